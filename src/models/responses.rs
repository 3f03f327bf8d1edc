use serde::{Deserialize, Serialize};

use crate::core::{DrawRecord, GameState, GameStatus};

/// Successful draw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResponse {
    /// Name the drawer got
    pub chosen: String,
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message, safe to show to players
    pub error: String,
    /// Machine-readable error kind
    pub code: String,
}

/// Admin listing of completed draws
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PairsResponse {
    Pairs(Vec<DrawRecord>),
    Empty { message: String },
}

impl PairsResponse {
    pub fn from_history(history: Vec<DrawRecord>) -> Self {
        if history.is_empty() {
            PairsResponse::Empty {
                message: "No draws yet".to_string(),
            }
        } else {
            PairsResponse::Pairs(history)
        }
    }
}

/// Admin summary of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatusResponse {
    pub game_id: String,
    #[serde(flatten)]
    pub status: GameStatus,
    pub participant_count: usize,
    pub draws_completed: usize,
    /// Participants who still have to draw
    pub pending_drawers: Vec<String>,
}

impl GameStatusResponse {
    pub fn from_state(game_id: &str, state: &GameState) -> Self {
        Self {
            game_id: game_id.to_string(),
            status: state.status(),
            participant_count: state.roster.len(),
            draws_completed: state.history.len(),
            pending_drawers: state.pending_drawers.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Roster;
    use time::OffsetDateTime;

    #[test]
    fn test_serialization_draw_response() {
        let response = DrawResponse {
            chosen: "Bea".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"chosen":"Bea"}"#);
    }

    #[test]
    fn test_pairs_response_empty() {
        let json = serde_json::to_value(PairsResponse::from_history(vec![])).unwrap();
        assert_eq!(json, serde_json::json!({"message": "No draws yet"}));
    }

    #[test]
    fn test_pairs_response_lists_history() {
        let record = DrawRecord {
            drawer: "Ana".to_string(),
            target: "Bea".to_string(),
            timestamp: OffsetDateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_value(PairsResponse::from_history(vec![record])).unwrap();

        assert_eq!(json[0]["drawer"], "Ana");
        assert_eq!(json[0]["target"], "Bea");
        assert_eq!(json[0]["timestamp"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_status_response_flattens_status() {
        let roster = Roster::new(["Ana", "Bea", "Cid"]).unwrap();
        let state = GameState::from_roster(&roster);

        let response = GameStatusResponse::from_state("default", &state);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["game_id"], "default");
        assert_eq!(json["participant_count"], 3);
        assert_eq!(json["draws_completed"], 0);
        assert_eq!(json["pending_drawers"], serde_json::json!(["Ana", "Bea", "Cid"]));
    }
}
