use anyhow::Context;
use std::net::SocketAddr;

use secret_santa::{config::AppConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "secret_santa=info,tower_http=warn".into()),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    tracing::info!(
        participants = config.roster.len(),
        backend = ?config.store_backend,
        game_id = %config.default_game_id,
        seeded = config.draw_seed.is_some(),
        "secret santa server starting"
    );
    if config.is_development() {
        tracing::debug!(?config, "running in development mode");
    }

    let state = AppState::from_config(&config);
    let app = routes::build_router(state, &config.static_dir);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
