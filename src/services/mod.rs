pub mod draw_service;
pub mod game_locks;

pub use draw_service::DrawService;
pub use game_locks::{GameLockGuard, GameLocks};
