use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppError,
    models::{GameStatusResponse, PairsResponse},
    state::AppState,
};

/// List every completed draw of the default game
pub async fn pairs(State(state): State<AppState>) -> Result<Json<PairsResponse>, AppError> {
    let game_id = state.default_game_id.clone();
    game_pairs(Path(game_id), State(state)).await
}

/// List every completed draw of a specific game
pub async fn game_pairs(
    Path(game_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PairsResponse>, AppError> {
    let snapshot = state.draws.snapshot(&game_id).await?;
    Ok(Json(PairsResponse::from_history(snapshot.history)))
}

/// Summarize the default game, including dead ends
pub async fn status(State(state): State<AppState>) -> Result<Json<GameStatusResponse>, AppError> {
    let game_id = state.default_game_id.clone();
    game_status(Path(game_id), State(state)).await
}

pub async fn game_status(
    Path(game_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GameStatusResponse>, AppError> {
    let snapshot = state.draws.snapshot(&game_id).await?;
    Ok(Json(GameStatusResponse::from_state(&game_id, &snapshot)))
}

/// Put the default game back to its initial roster
pub async fn reset(State(state): State<AppState>) -> Result<Json<GameStatusResponse>, AppError> {
    let game_id = state.default_game_id.clone();
    game_reset(Path(game_id), State(state)).await
}

/// Put a specific game back to its initial roster
///
/// This is the only way out of a deadlocked game.
pub async fn game_reset(
    Path(game_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GameStatusResponse>, AppError> {
    let fresh = state.draws.reset(&game_id).await?;
    Ok(Json(GameStatusResponse::from_state(&game_id, &fresh)))
}
