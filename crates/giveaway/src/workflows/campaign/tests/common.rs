use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::campaign::repository::{GiveawayStore, RepositoryError};
use crate::workflows::campaign::{campaign_router, GiveawayService};
use crate::workflows::draw::DrawHistory;
use crate::workflows::entries::{EligibilityConfig, Entry, RawEntry};

pub(super) const EVENT_HASHTAG: &str = "#AngThongMusicLove";

pub(super) fn event_config() -> EligibilityConfig {
    EligibilityConfig {
        required_hashtag: EVENT_HASHTAG.to_string(),
        min_text_length: 5,
        ..EligibilityConfig::default()
    }
}

/// Three comments: two qualify, one is missing the hashtag.
pub(super) fn raw_entries() -> Vec<RawEntry> {
    vec![
        RawEntry::new("u1", "Ann", "#AngThongMusicLove @Somchai see you there"),
        RawEntry::new("u2", "Ben", "#AngThongMusicLove @Mali count us in"),
        RawEntry::new("u3", "Cat", "@Bob looks fun, wish us luck"),
    ]
}

#[derive(Default)]
pub(super) struct MemoryStore {
    entries: Mutex<Vec<Entry>>,
    config: Mutex<EligibilityConfig>,
    history: Mutex<DrawHistory>,
}

impl MemoryStore {
    pub(super) fn with_config(config: EligibilityConfig) -> Self {
        Self {
            config: Mutex::new(config),
            ..Self::default()
        }
    }
}

impl GiveawayStore for MemoryStore {
    fn entries(&self) -> Result<Vec<Entry>, RepositoryError> {
        Ok(self.entries.lock().expect("entries mutex poisoned").clone())
    }

    fn replace_entries(&self, entries: Vec<Entry>) -> Result<(), RepositoryError> {
        *self.entries.lock().expect("entries mutex poisoned") = entries;
        Ok(())
    }

    fn config(&self) -> Result<EligibilityConfig, RepositoryError> {
        Ok(self.config.lock().expect("config mutex poisoned").clone())
    }

    fn save_config(&self, config: EligibilityConfig) -> Result<(), RepositoryError> {
        *self.config.lock().expect("config mutex poisoned") = config;
        Ok(())
    }

    fn history(&self) -> Result<DrawHistory, RepositoryError> {
        Ok(self.history.lock().expect("history mutex poisoned").clone())
    }

    fn save_history(&self, history: DrawHistory) -> Result<(), RepositoryError> {
        *self.history.lock().expect("history mutex poisoned") = history;
        Ok(())
    }
}

/// Boxed callback fired once, the first time a draw reads history.
pub(super) type HistoryHook = Box<dyn FnOnce() + Send>;

/// Memory store that runs a hook on the next history read, to interleave requests.
pub(super) struct HookStore {
    inner: MemoryStore,
    on_history: Mutex<Option<HistoryHook>>,
}

impl HookStore {
    pub(super) fn with_config(config: EligibilityConfig) -> Self {
        Self {
            inner: MemoryStore::with_config(config),
            on_history: Mutex::new(None),
        }
    }

    pub(super) fn set_history_hook(&self, hook: HistoryHook) {
        *self.on_history.lock().expect("hook mutex poisoned") = Some(hook);
    }
}

impl GiveawayStore for HookStore {
    fn entries(&self) -> Result<Vec<Entry>, RepositoryError> {
        self.inner.entries()
    }

    fn replace_entries(&self, entries: Vec<Entry>) -> Result<(), RepositoryError> {
        self.inner.replace_entries(entries)
    }

    fn config(&self) -> Result<EligibilityConfig, RepositoryError> {
        self.inner.config()
    }

    fn save_config(&self, config: EligibilityConfig) -> Result<(), RepositoryError> {
        self.inner.save_config(config)
    }

    fn history(&self) -> Result<DrawHistory, RepositoryError> {
        let snapshot = self.inner.history()?;
        let hook = self.on_history.lock().expect("hook mutex poisoned").take();
        if let Some(hook) = hook {
            hook();
        }
        Ok(snapshot)
    }

    fn save_history(&self, history: DrawHistory) -> Result<(), RepositoryError> {
        self.inner.save_history(history)
    }
}

pub(super) struct UnavailableStore;

impl GiveawayStore for UnavailableStore {
    fn entries(&self) -> Result<Vec<Entry>, RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }

    fn replace_entries(&self, _entries: Vec<Entry>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }

    fn config(&self) -> Result<EligibilityConfig, RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }

    fn save_config(&self, _config: EligibilityConfig) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }

    fn history(&self) -> Result<DrawHistory, RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }

    fn save_history(&self, _history: DrawHistory) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }
}

pub(super) fn build_service() -> (GiveawayService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_config(event_config()));
    let service = GiveawayService::new(store.clone());
    (service, store)
}

pub(super) fn campaign_router_with_service(service: GiveawayService<MemoryStore>) -> axum::Router {
    campaign_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
