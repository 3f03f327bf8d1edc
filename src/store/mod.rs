//! Persistence for game states
//!
//! The draw engine never touches storage; services load a [`GameState`],
//! compute a transition, then save the result through a [`GameStore`].

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::{GameState, Roster};

/// Failures of the storage backend, distinct from draw rejections
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid game id '{game_id}': {reason}")]
    InvalidGameId { game_id: String, reason: String },
    #[error("stored game '{game_id}' is corrupt: {reason}")]
    Corrupt { game_id: String, reason: String },
    #[error("failed to encode game state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable holder of one [`GameState`] per game id
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Roster new games are seeded from
    fn roster(&self) -> &Roster;

    /// Load the state for `game_id`, seeding it from the roster if absent
    async fn load(&self, game_id: &str) -> Result<GameState, StoreError>;

    /// Persist `state` for `game_id`, replacing any previous value
    async fn save(&self, game_id: &str, state: &GameState) -> Result<(), StoreError>;

    /// Put `game_id` back to its freshly seeded state
    async fn reset(&self, game_id: &str) -> Result<GameState, StoreError> {
        let state = GameState::from_roster(self.roster());
        self.save(game_id, &state).await?;
        Ok(state)
    }
}
