/// Minimum number of participants needed for a draw to make sense
pub const MIN_PARTICIPANTS: usize = 2;

/// Maximum number of participants in a single roster
pub const MAX_PARTICIPANTS: usize = 500;

/// Maximum length of a participant name (in characters, after trimming)
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length of a game identifier
pub const MAX_GAME_ID_LENGTH: usize = 64;

/// Game id used by the legacy single-group routes
pub const DEFAULT_GAME_ID: &str = "default";
