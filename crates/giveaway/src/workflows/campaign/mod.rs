//! Campaign orchestration: a caller-supplied store, the eligibility engine, and the
//! draw session wired together, plus the HTTP surface over them.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{GiveawayStore, RepositoryError};
pub use router::campaign_router;
pub use service::{
    DrawPreview, DrawScope, EntryStatistics, GiveawayService, ImportMode, ImportSummary,
    ServiceError,
};
