use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::GameLocks;
use crate::core::{attempt_draw, validate_game_id, DrawError, DrawRecord, GameState};
use crate::error::AppError;
use crate::store::GameStore;

/// Runs draws against a store, one game at a time
pub struct DrawService {
    store: Arc<dyn GameStore>,
    locks: GameLocks,
    rng: Mutex<StdRng>,
}

impl DrawService {
    /// Create a service over `store`
    ///
    /// # Arguments
    ///
    /// * `store` - Backend holding game states
    /// * `seed` - Fixed RNG seed for reproducible draws, or None for entropy
    pub fn new(store: Arc<dyn GameStore>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Self {
            store,
            locks: GameLocks::new(),
            rng: Mutex::new(rng),
        }
    }

    /// Let `name` draw in `game_id` and persist the result
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad game id, a draw error when the
    /// engine rejects the request, or a store error if loading or saving fails.
    /// On any error the stored state is left unchanged.
    pub async fn draw(&self, game_id: &str, name: &str) -> Result<DrawRecord, AppError> {
        let game_id = validate_game_id(game_id).map_err(AppError::Validation)?;

        let _guard = self.locks.acquire(game_id).await;

        let state = self.store.load(game_id).await?;

        let outcome = {
            let mut rng = self.rng.lock().await;
            attempt_draw(&state, name, &mut *rng)
        };

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                if let DrawError::CycleDeadlock { drawer } = &err {
                    warn!(game_id, drawer = %drawer, "game deadlocked, reset required");
                }
                return Err(err.into());
            }
        };

        self.store.save(game_id, &outcome.state).await?;

        info!(
            game_id,
            drawer = %outcome.drawer,
            remaining = outcome.state.pending_drawers.len(),
            "draw completed"
        );

        Ok(outcome.record())
    }

    /// Current state of `game_id`, seeded if it was never played
    pub async fn snapshot(&self, game_id: &str) -> Result<GameState, AppError> {
        let game_id = validate_game_id(game_id).map_err(AppError::Validation)?;
        Ok(self.store.load(game_id).await?)
    }

    /// Restore `game_id` to its initial roster, discarding all draws
    pub async fn reset(&self, game_id: &str) -> Result<GameState, AppError> {
        let game_id = validate_game_id(game_id).map_err(AppError::Validation)?;

        let _guard = self.locks.acquire(game_id).await;
        let state = self.store.reset(game_id).await?;

        warn!(game_id, participants = state.roster.len(), "game reset");
        Ok(state)
    }
}
