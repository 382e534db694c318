//! Fleetman server: reads settings from the environment, ensures the spacecraft tables exist, serves the API.

use fleetman::{app, ensure_tables, init_logging, AppState, PgSpacecraftRepository, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    init_logging(settings.log_level, &settings.log_target)?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.connection_string)
        .await?;
    ensure_tables(&pool).await?;

    let state = AppState::new(Arc::new(PgSpacecraftRepository::new(pool)));

    let listener = TcpListener::bind(settings.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
