use std::sync::Arc;

use anyhow::Context;
use fitcoach_api::{
    app::{app, AppState},
    config,
    database::Database,
    services::UserService,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting FitCoach API in {:?} mode", config.environment);
    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; protected routes will reject every request");
    }

    // Fail fast: never serve traffic without a working data layer
    let database = Database::connect_or_exit(&config.database).await;

    let users = Arc::new(UserService::new(database, config.security.jwt_secret.clone()));
    let router = app(AppState::new(users), &config.security.cors_origins);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("FitCoach API listening on http://{}", bind_addr);
    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
