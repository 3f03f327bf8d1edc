pub mod admin;
pub mod draw;
pub mod health;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    middleware::{rate_limit_middleware, security_headers_middleware, RateLimiter},
    state::AppState,
};

/// Build the full application router
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `static_dir` - Directory holding `index.html` and the page assets
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Page and assets
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/health", get(health::health_check))
        // Default game
        .route("/draw", post(draw::draw))
        .route("/admin/pairs", get(admin::pairs))
        .route("/admin/status", get(admin::status))
        .route("/admin/reset", post(admin::reset))
        // Explicit game id
        .route("/api/games/:game_id/draw", post(draw::draw_in_game))
        .route("/api/games/:game_id/pairs", get(admin::game_pairs))
        .route("/api/games/:game_id/status", get(admin::game_status))
        .route("/api/games/:game_id/reset", post(admin::game_reset))
        .with_state(state)
        // Applied in reverse order
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers_middleware))
                .layer(middleware::from_fn_with_state(
                    RateLimiter::new(),
                    rate_limit_middleware,
                ))
                .layer(cors),
        )
}
