use crate::workflows::draw::DrawHistory;
use crate::workflows::entries::{EligibilityConfig, Entry};

/// Caller-owned storage for the entry pool, rule configuration, and draw history.
///
/// The core never persists anything itself; the service reads a snapshot, computes,
/// and writes the new snapshot back through this trait.
pub trait GiveawayStore: Send + Sync {
    fn entries(&self) -> Result<Vec<Entry>, RepositoryError>;
    fn replace_entries(&self, entries: Vec<Entry>) -> Result<(), RepositoryError>;
    fn config(&self) -> Result<EligibilityConfig, RepositoryError>;
    fn save_config(&self, config: EligibilityConfig) -> Result<(), RepositoryError>;
    fn history(&self) -> Result<DrawHistory, RepositoryError>;
    fn save_history(&self, history: DrawHistory) -> Result<(), RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
