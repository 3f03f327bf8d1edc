use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of per-game mutexes
///
/// Holding the guard returned by [`GameLocks::acquire`] serializes the
/// load-compute-save cycle of one game while other games proceed freely.
/// An entry lives only while some task holds or waits for its lock.
#[derive(Debug, Default)]
pub struct GameLocks {
    // Never held across an await, and pruned from `Drop`, so not async
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Exclusive access to one game; the registry entry is pruned on drop
/// when no other task is queued on it
#[derive(Debug)]
pub struct GameLockGuard<'a> {
    registry: &'a GameLocks,
    game_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `game_id`
    pub async fn acquire(&self, game_id: &str) -> GameLockGuard<'_> {
        let lock = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(game_id.to_string())
            .or_default()
            .clone();

        GameLockGuard {
            registry: self,
            game_id: game_id.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of games currently locked or waited on
    #[cfg(test)]
    pub fn tracked_games(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for GameLockGuard<'_> {
    fn drop(&mut self) {
        // Release first so the owned guard's reference is gone
        self.guard.take();

        let mut locks = self
            .registry
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Waiters clone the Arc under the registry lock, so a count of one
        // means nobody else is holding or queued
        if locks
            .get(&self.game_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.game_id);
        }
    }
}
