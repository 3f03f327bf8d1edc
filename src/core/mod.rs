pub mod constants;
pub mod draw;
pub mod game_id;
pub mod roster;

pub use constants::*;
pub use draw::{
    attempt_draw, DrawError, DrawOutcome, DrawRecord, GameState, GameStatus, Ineligibility,
};
pub use game_id::validate_game_id;
pub use roster::{Roster, RosterError};
