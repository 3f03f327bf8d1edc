use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::{GameStore, StoreError};
use crate::core::{validate_game_id, GameState, Roster};

/// Stores each game as a pretty-printed JSON document in a directory
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    roster: Roster,
}

impl FileStore {
    /// Create a store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>, roster: Roster) -> Self {
        Self {
            dir: dir.into(),
            roster,
        }
    }

    fn path_for(&self, game_id: &str) -> Result<PathBuf, StoreError> {
        // Game ids become file names, so they are re-checked here
        let game_id = validate_game_id(game_id).map_err(|reason| StoreError::InvalidGameId {
            game_id: game_id.to_string(),
            reason,
        })?;
        Ok(self.dir.join(format!("{}.json", game_id)))
    }
}

#[async_trait]
impl GameStore for FileStore {
    fn roster(&self) -> &Roster {
        &self.roster
    }

    async fn load(&self, game_id: &str) -> Result<GameState, StoreError> {
        let path = self.path_for(game_id)?;

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(game_id, "no stored game, seeding from roster");
                return Ok(GameState::from_roster(&self.roster));
            }
            Err(e) => return Err(e.into()),
        };

        let state: GameState =
            serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
                game_id: game_id.to_string(),
                reason: e.to_string(),
            })?;

        if let Err(reason) = state.check_invariants() {
            warn!(game_id, %reason, "stored game failed invariant check");
            return Err(StoreError::Corrupt {
                game_id: game_id.to_string(),
                reason,
            });
        }

        Ok(state)
    }

    async fn save(&self, game_id: &str, state: &GameState) -> Result<(), StoreError> {
        let path = self.path_for(game_id)?;
        let json = serde_json::to_vec_pretty(state)?;

        tokio::fs::create_dir_all(&self.dir).await?;

        // Write then rename so readers never observe a half-written file
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(game_id, path = %path.display(), "saved game state");
        Ok(())
    }
}
