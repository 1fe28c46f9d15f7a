use anyhow::Context;
use std::sync::Arc;

use crate::auth::JwtAuthenticator;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::state::AppState;

pub async fn handle(config: &AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    tracing::info!("Starting Superhero API in {:?} mode", config.environment);

    let store = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open superhero store")?;
    let authenticator = JwtAuthenticator::new(&config.security.jwt_secret)
        .context("JWT_SECRET must be set")?;

    let state = AppState::new(store, Arc::new(authenticator));
    let app = crate::app(state, config);

    let bind_addr = format!("{}:{}", config.server.host, port.unwrap_or(config.server.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Superhero API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Superhero API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
