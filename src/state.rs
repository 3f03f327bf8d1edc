use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::services::DrawService;
use crate::store::{FileStore, GameStore, MemoryStore};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub draws: Arc<DrawService>,
    /// Game played through the single-group routes
    pub default_game_id: String,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, default_game_id: String, seed: Option<u64>) -> Self {
        Self {
            draws: Arc::new(DrawService::new(store, seed)),
            default_game_id,
        }
    }

    /// Wire the configured store backend
    pub fn from_config(config: &AppConfig) -> Self {
        let store: Arc<dyn GameStore> = match config.store_backend {
            StoreBackend::File => Arc::new(FileStore::new(
                config.data_dir.clone(),
                config.roster.clone(),
            )),
            StoreBackend::Memory => Arc::new(MemoryStore::new(config.roster.clone())),
        };

        Self::new(store, config.default_game_id.clone(), config.draw_seed)
    }
}
