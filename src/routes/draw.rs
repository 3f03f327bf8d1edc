use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::{
    error::AppError,
    models::{DrawRequest, DrawResponse},
    state::AppState,
};

/// Draw a name in the default game
///
/// `POST /draw` with `{"name": "..."}` answers `{"chosen": "..."}`.
pub async fn draw(
    State(state): State<AppState>,
    body: Result<Json<DrawRequest>, JsonRejection>,
) -> Result<Json<DrawResponse>, AppError> {
    let game_id = state.default_game_id.clone();
    run_draw(&state, &game_id, body).await
}

/// Draw a name in a specific game
pub async fn draw_in_game(
    Path(game_id): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<DrawRequest>, JsonRejection>,
) -> Result<Json<DrawResponse>, AppError> {
    run_draw(&state, &game_id, body).await
}

async fn run_draw(
    state: &AppState,
    game_id: &str,
    body: Result<Json<DrawRequest>, JsonRejection>,
) -> Result<Json<DrawResponse>, AppError> {
    let Json(request) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let request = DrawRequest::new(request.name).map_err(AppError::Validation)?;

    let record = state.draws.draw(game_id, &request.name).await?;

    Ok(Json(DrawResponse {
        chosen: record.target,
    }))
}
