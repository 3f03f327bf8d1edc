use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

/// Health check endpoint
///
/// Reports `degraded` with 503 when the default game cannot be loaded.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.draws.snapshot(&state.default_game_id).await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))),
        Err(err) => {
            tracing::error!(error = %err, "health check could not load game");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"status": "degraded"})),
            )
        }
    }
}
