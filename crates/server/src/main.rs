mod api;
mod bootstrap;
mod health;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use larder_core::config::{AppConfig, LoadOptions};
use larder_core::SystemCalendar;
use tracing::{error, info};

fn init_logging(config: &AppConfig) {
    use larder_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    // Bootstrap with the config already loaded
    let app = bootstrap::bootstrap_with_config(config, Arc::new(SystemCalendar)).await?;

    let router: Router =
        api::router(app.state.clone()).merge(health::router(app.db_pool.clone()));

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        storage_backend = app.config.storage.backend.as_str(),
        "larder-server listening"
    );

    let grace = Duration::from_secs(app.config.server.graceful_shutdown_secs);
    if let Err(error) =
        axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown()).await
    {
        error!(
            event_name = "system.server.error",
            correlation_id = "shutdown",
            error = %error,
            "server terminated unexpectedly"
        );
    }

    info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        "larder-server stopping"
    );
    if let Some(pool) = app.db_pool {
        if tokio::time::timeout(grace, pool.close()).await.is_err() {
            error!(
                event_name = "system.server.pool_close_timeout",
                correlation_id = "shutdown",
                grace_secs = grace.as_secs(),
                "database pool did not close within the grace period"
            );
        }
    }

    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(
            event_name = "system.server.signal_error",
            correlation_id = "shutdown",
            error = %error,
            "failed to listen for shutdown signal"
        );
    }
}
