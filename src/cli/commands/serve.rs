use anyhow::Context;

use crate::config::AppConfig;
use crate::database::Database;
use crate::routes;
use crate::state::AppState;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting hrdocs-api in {:?} mode", config.environment);

    let db = Database::connect(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    db.init_schema().await.context("failed to create schema")?;

    let bind_addr = config.bind_addr();
    let state = AppState::new(db.clone(), config);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
