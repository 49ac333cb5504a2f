use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::repository::{GiveawayStore, RepositoryError};
use crate::workflows::draw::{
    DrawHistory, DrawPhase, DrawResult, DrawSession, DrawSessionError, DEFAULT_DRAWN_BY,
};
use crate::workflows::entries::{
    dedupe, ConfigPatchError, EligibilityConfig, EligibilityConfigPatch, EligibilityEngine, Entry,
    EntryId, EntryStatus, ExternalFlags, RawEntry,
};

/// Whether an import replaces the stored pool or appends to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    #[default]
    Replace,
    Append,
}

/// Which entries a draw picks from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawScope {
    /// Only entries that passed validation.
    #[default]
    Qualified,
    /// Every stored entry; a winner who failed validation comes back with a warning.
    AllEntries,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub received: usize,
    pub duplicates_dropped: usize,
    pub statistics: EntryStatistics,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStatistics {
    pub total: usize,
    pub qualified: usize,
    pub disqualified: usize,
    pub pending: usize,
}

impl EntryStatistics {
    pub fn from_entries(entries: &[Entry]) -> Self {
        entries
            .iter()
            .fold(Self::default(), |mut stats, entry| {
                stats.total += 1;
                match entry.status {
                    EntryStatus::Passed => stats.qualified += 1,
                    EntryStatus::Failed => stats.disqualified += 1,
                    EntryStatus::Pending => stats.pending += 1,
                }
                stats
            })
    }
}

/// What the caller sees after selecting, before confirming or discarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPreview {
    pub phase: DrawPhase,
    pub seed: String,
    pub pool_size: usize,
    pub previous_winners: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Service composing the caller's store, the validator, and the draw session.
///
/// Every operation that writes to the store holds the session lock across its reads
/// and writes, so concurrent requests see each other's confirmed winners.
pub struct GiveawayService<S> {
    store: Arc<S>,
    session: Mutex<DrawSession>,
    default_drawn_by: String,
}

impl<S> GiveawayService<S>
where
    S: GiveawayStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            session: Mutex::new(DrawSession::new()),
            default_drawn_by: DEFAULT_DRAWN_BY.to_string(),
        }
    }

    /// Name recorded on confirmed draws when the caller leaves `drawn_by` blank.
    pub fn with_default_drawn_by(mut self, drawn_by: impl Into<String>) -> Self {
        let drawn_by = drawn_by.into();
        if !drawn_by.trim().is_empty() {
            self.default_drawn_by = drawn_by;
        }
        self
    }

    /// Validates and dedupes raw entries, then stores them. Any pending selection is
    /// dropped since it was made against the previous pool.
    pub fn import(
        &self,
        raw_entries: Vec<RawEntry>,
        mode: ImportMode,
    ) -> Result<ImportSummary, ServiceError> {
        let mut session = self.session()?;
        let received = raw_entries.len();
        let engine = EligibilityEngine::new(self.store.config()?);
        let validated = engine.validate_all(raw_entries);

        let combined = match mode {
            ImportMode::Replace => validated,
            ImportMode::Append => {
                let mut existing = self.store.entries()?;
                existing.extend(validated);
                existing
            }
        };
        let before = combined.len();
        let entries = dedupe(combined);
        let duplicates_dropped = before - entries.len();
        let statistics = EntryStatistics::from_entries(&entries);

        self.store.replace_entries(entries)?;
        *session = DrawSession::new();

        info!(
            received,
            duplicates_dropped,
            qualified = statistics.qualified,
            total = statistics.total,
            ?mode,
            "entries imported"
        );

        Ok(ImportSummary {
            received,
            duplicates_dropped,
            statistics,
        })
    }

    pub fn entries(&self) -> Result<Vec<Entry>, ServiceError> {
        Ok(self.store.entries()?)
    }

    pub fn qualified(&self) -> Result<Vec<Entry>, ServiceError> {
        Ok(self
            .store
            .entries()?
            .into_iter()
            .filter(Entry::is_qualified)
            .collect())
    }

    pub fn statistics(&self) -> Result<EntryStatistics, ServiceError> {
        Ok(EntryStatistics::from_entries(&self.store.entries()?))
    }

    pub fn config(&self) -> Result<EligibilityConfig, ServiceError> {
        Ok(self.store.config()?)
    }

    /// Merges the patch and re-validates every stored entry against the result.
    /// A pending selection is dropped because the winner may no longer qualify.
    pub fn update_config(
        &self,
        patch: &EligibilityConfigPatch,
    ) -> Result<EligibilityConfig, ServiceError> {
        let mut session = self.session()?;
        let config = self.store.config()?.merge(patch)?;
        let engine = EligibilityEngine::new(config.clone());

        let mut entries = self.store.entries()?;
        for entry in &mut entries {
            engine.apply(entry);
        }

        self.store.save_config(config.clone())?;
        self.store.replace_entries(entries)?;
        *session = DrawSession::new();
        info!(?config, "eligibility config updated");
        Ok(config)
    }

    /// Replaces the externally verified flags of one entry.
    pub fn update_flags(&self, id: &EntryId, flags: ExternalFlags) -> Result<Entry, ServiceError> {
        let _session = self.session()?;
        let engine = EligibilityEngine::new(self.store.config()?);
        let mut entries = self.store.entries()?;

        let entry = entries
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| ServiceError::EntryNotFound(id.clone()))?;
        entry.flags = flags;
        engine.apply(entry);
        let updated = entry.clone();

        self.store.replace_entries(entries)?;
        Ok(updated)
    }

    /// Runs the engine over the scoped pool, excluding every confirmed winner.
    pub fn start_draw(
        &self,
        seed: Option<&str>,
        scope: DrawScope,
    ) -> Result<DrawPreview, ServiceError> {
        let mut session = self.session()?;
        let entries = self.store.entries()?;
        let pool: Vec<Entry> = match scope {
            DrawScope::Qualified => entries.into_iter().filter(Entry::is_qualified).collect(),
            DrawScope::AllEntries => entries,
        };
        let history = self.store.history()?;
        let previous_winners = history.excluded_ids().len();

        let phase = session.select(&pool, &history, seed)?.clone();

        let (seed, warning) = match &phase {
            DrawPhase::ResultWinner { winner, seed } => {
                let warning = (!winner.is_qualified()).then(|| {
                    format!(
                        "{} did not pass validation: {}",
                        winner.display_name,
                        winner.fail_reasons.join("; ")
                    )
                });
                info!(winner = %winner.id, %seed, pool = pool.len(), "draw selected");
                (seed.clone(), warning)
            }
            DrawPhase::ResultEmpty { seed } => {
                warn!(%seed, pool = pool.len(), "no eligible entries left to draw");
                (seed.clone(), None)
            }
            DrawPhase::Idle | DrawPhase::Selecting => (String::new(), None),
        };

        Ok(DrawPreview {
            phase,
            seed,
            pool_size: pool.len(),
            previous_winners,
            warning,
        })
    }

    /// Records the pending winner in history.
    pub fn confirm_draw(&self, drawn_by: &str) -> Result<DrawResult, ServiceError> {
        let drawn_by = if drawn_by.trim().is_empty() {
            self.default_drawn_by.as_str()
        } else {
            drawn_by
        };
        let mut session = self.session()?;
        let entries = self.store.entries()?;
        let qualified: Vec<Entry> = entries.iter().filter(|e| e.is_qualified()).cloned().collect();
        let mut history = self.store.history()?;

        let result = session.confirm(&entries, &qualified, drawn_by, &mut history)?;
        self.store.save_history(history)?;

        info!(
            draw_id = result.id(),
            seed = result.seed(),
            drawn_by = result.drawn_by(),
            "draw confirmed"
        );
        Ok(result)
    }

    pub fn discard_draw(&self) -> Result<(), ServiceError> {
        self.session()?.discard()?;
        info!("draw discarded");
        Ok(())
    }

    pub fn draw_phase(&self) -> Result<DrawPhase, ServiceError> {
        Ok(self.session()?.phase().clone())
    }

    pub fn history(&self) -> Result<DrawHistory, ServiceError> {
        Ok(self.store.history()?)
    }

    pub fn clear_history(&self) -> Result<(), ServiceError> {
        let _session = self.session()?;
        self.store.save_history(DrawHistory::new())?;
        info!("draw history cleared");
        Ok(())
    }

    pub fn clear_entries(&self) -> Result<(), ServiceError> {
        let mut session = self.session()?;
        self.store.replace_entries(Vec::new())?;
        *session = DrawSession::new();
        info!("entries cleared");
        Ok(())
    }

    fn session(&self) -> Result<MutexGuard<'_, DrawSession>, ServiceError> {
        self.session
            .lock()
            .map_err(|_| ServiceError::SessionUnavailable)
    }
}

/// Error raised by the giveaway service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Config(#[from] ConfigPatchError),
    #[error(transparent)]
    Session(#[from] DrawSessionError),
    #[error("entry {0} not found")]
    EntryNotFound(EntryId),
    #[error("draw session lock poisoned")]
    SessionUnavailable,
}
