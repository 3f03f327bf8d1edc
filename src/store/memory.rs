use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{GameStore, StoreError};
use crate::core::{GameState, Roster};

/// In-process store, lost on restart
#[derive(Debug)]
pub struct MemoryStore {
    roster: Roster,
    games: RwLock<HashMap<String, GameState>>,
}

impl MemoryStore {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            games: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    fn roster(&self) -> &Roster {
        &self.roster
    }

    async fn load(&self, game_id: &str) -> Result<GameState, StoreError> {
        let games = self.games.read().await;
        Ok(games
            .get(game_id)
            .cloned()
            .unwrap_or_else(|| GameState::from_roster(&self.roster)))
    }

    async fn save(&self, game_id: &str, state: &GameState) -> Result<(), StoreError> {
        let mut games = self.games.write().await;
        games.insert(game_id.to_string(), state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn store() -> MemoryStore {
        MemoryStore::new(Roster::new(["Ana", "Bea", "Cid"]).unwrap())
    }

    #[tokio::test]
    async fn test_load_seeds_missing_game() {
        let store = store();
        let state = store.load("party").await.unwrap();

        assert_eq!(state.pending_drawers.len(), 3);
        assert_eq!(state.pending_drawers, state.eligible_targets);
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = store();
        let seeded = store.load("party").await.unwrap();
        let outcome =
            crate::core::attempt_draw(&seeded, "Bea", &mut StdRng::seed_from_u64(5)).unwrap();

        store.save("party", &outcome.state).await.unwrap();

        assert_eq!(store.load("party").await.unwrap(), outcome.state);
    }

    #[tokio::test]
    async fn test_games_are_isolated() {
        let store = store();
        let seeded = store.load("one").await.unwrap();
        let outcome =
            crate::core::attempt_draw(&seeded, "Ana", &mut StdRng::seed_from_u64(1)).unwrap();
        store.save("one", &outcome.state).await.unwrap();

        let other = store.load("two").await.unwrap();
        assert!(other.history.is_empty());
    }

    #[tokio::test]
    async fn test_reset_restores_roster() {
        let store = store();
        let seeded = store.load("party").await.unwrap();
        let outcome =
            crate::core::attempt_draw(&seeded, "Ana", &mut StdRng::seed_from_u64(1)).unwrap();
        store.save("party", &outcome.state).await.unwrap();

        let reset = store.reset("party").await.unwrap();

        assert_eq!(reset, seeded);
        assert_eq!(store.load("party").await.unwrap(), seeded);
    }
}
