use anyhow::Context;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

use crate::config;
use crate::database::DatabaseManager;
use crate::state::AppState;

use super::seed::seed_store;

pub async fn handle(port: Option<u16>, seed: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = config::config().clone();
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;
    info!("Starting myFlix in {:?} mode", config.environment);

    let store = DatabaseManager::connect(&config).await?;
    if let Some(path) = seed {
        let count = seed_store(store.as_ref(), &path).await?;
        info!("Seeded {} movies from {}", count, path.display());
    }

    let bind_addr = config.bind_address();
    let app = crate::app(AppState::new(store, config));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("myFlix listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("myFlix stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
