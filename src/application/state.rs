// src/application/state.rs

use std::sync::Arc;

use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::infrastructure::ApiConfig;
use crate::integrations::{BookApi, LibraryApiClient};
use crate::services::CollectionStore;

/// Everything a front end needs, wired once at startup.
/// All fields are Arc-wrapped for sharing across handlers.
pub struct AppState {
    pub config: ApiConfig,
    pub event_bus: Arc<EventBus>,
    pub api: Arc<dyn BookApi>,
    pub store: Arc<CollectionStore>,
}

impl AppState {
    /// Wire the HTTP client, event bus and store for `config`
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        let api: Arc<dyn BookApi> = Arc::new(LibraryApiClient::new(&config)?);
        Ok(Self::with_api(config, api))
    }

    /// Wire the store on top of an existing transport
    pub fn with_api(config: ApiConfig, api: Arc<dyn BookApi>) -> Self {
        let event_bus = Arc::new(create_event_bus());
        let store = Arc::new(CollectionStore::new(Arc::clone(&api), Arc::clone(&event_bus)));
        Self {
            config,
            event_bus,
            api,
            store,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish()
    }
}
