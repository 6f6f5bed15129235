use std::sync::Arc;
use crate::clock::{Clock, SystemClock};
use crate::config::CoachConfig;
use crate::store::{JsonFileStore, StateStore};

/// Host-side container: configuration plus the collaborators the core
/// consumes (state store and clock). Passed explicitly to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CoachConfig>,
    pub store: Arc<dyn StateStore>,
    pub clock: Arc<dyn Clock>,
    /// Serialises read-modify-replace cycles on the store
    pub(crate) update_lock: Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    pub fn new(config: CoachConfig, store: Arc<dyn StateStore>, clock: Arc<dyn Clock>) -> Self {
        AppState {
            config: Arc::new(config),
            store,
            clock,
            update_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// JSON file store at the configured path, system clock
    pub fn from_config(config: CoachConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(config.store.path.clone()));
        Self::new(config, store, Arc::new(SystemClock))
    }
}
