use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::core::DrawError;
use crate::models::ErrorResponse;
use crate::store::StoreError;

/// Everything a request handler can fail with
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input rejected before reaching the engine
    #[error("{0}")]
    Validation(String),
    /// Draw rejected by the engine
    #[error(transparent)]
    Draw(#[from] DrawError),
    /// Storage backend failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Draw(DrawError::CycleDeadlock { .. }) => StatusCode::CONFLICT,
            AppError::Draw(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "invalid_request",
            AppError::Draw(err) => err.code(),
            AppError::Store(_) => "storage_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage details stay in the logs
        let message = match &self {
            AppError::Store(err) => {
                tracing::error!(error = %err, "storage failure");
                "Could not access the game data. Please try again later.".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: self.code().to_string(),
            }),
        )
            .into_response()
    }
}
