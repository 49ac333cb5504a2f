use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

use giveaway::workflows::campaign::{GiveawayStore, RepositoryError};
use giveaway::workflows::draw::DrawHistory;
use giveaway::workflows::entries::{EligibilityConfig, Entry};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) event_name: Arc<str>,
}

/// Process-local store; everything is lost when the process exits.
#[derive(Default, Clone)]
pub(crate) struct InMemoryGiveawayStore {
    entries: Arc<Mutex<Vec<Entry>>>,
    config: Arc<Mutex<EligibilityConfig>>,
    history: Arc<Mutex<DrawHistory>>,
}

impl InMemoryGiveawayStore {
    pub(crate) fn new(config: EligibilityConfig) -> Self {
        Self::with_history(config, DrawHistory::new())
    }

    pub(crate) fn with_history(config: EligibilityConfig, history: DrawHistory) -> Self {
        Self {
            entries: Arc::default(),
            config: Arc::new(Mutex::new(config)),
            history: Arc::new(Mutex::new(history)),
        }
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{what} lock poisoned")))
}

impl GiveawayStore for InMemoryGiveawayStore {
    fn entries(&self) -> Result<Vec<Entry>, RepositoryError> {
        Ok(lock(&self.entries, "entries")?.clone())
    }

    fn replace_entries(&self, entries: Vec<Entry>) -> Result<(), RepositoryError> {
        *lock(&self.entries, "entries")? = entries;
        Ok(())
    }

    fn config(&self) -> Result<EligibilityConfig, RepositoryError> {
        Ok(lock(&self.config, "config")?.clone())
    }

    fn save_config(&self, config: EligibilityConfig) -> Result<(), RepositoryError> {
        *lock(&self.config, "config")? = config;
        Ok(())
    }

    fn history(&self) -> Result<DrawHistory, RepositoryError> {
        Ok(lock(&self.history, "history")?.clone())
    }

    fn save_history(&self, history: DrawHistory) -> Result<(), RepositoryError> {
        *lock(&self.history, "history")? = history;
        Ok(())
    }
}
