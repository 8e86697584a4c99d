//! Webhook Inspector - Binary Entry Point
//!
//! Loads configuration, starts the retention janitor and serves HTTP until
//! Ctrl+C or SIGTERM.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use webhook_inspector::api::{self, AppState};
use webhook_inspector::config::{Config, DEFAULT_LOG_FILTER};
use webhook_inspector::event_store::EventStore;
use webhook_inspector::janitor::RetentionJanitor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        version = webhook_inspector::VERSION,
        retention_secs = config.retention.as_secs(),
        "Starting webhook inspector"
    );

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(true);
    })?;

    let store = Arc::new(EventStore::with_retention(config.retention));
    let janitor = RetentionJanitor::new(store.clone(), config.janitor).spawn();

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Starting webhook listener");

    let state = Arc::new(AppState::new(store).with_max_body_bytes(config.max_body_bytes));
    let served = api::serve(listener, state, async move {
        let _ = shutdown_rx.wait_for(|stop| *stop).await;
        tracing::info!("Shutdown signal received");
    })
    .await;

    janitor.shutdown().await;
    served?;

    tracing::info!("Shutdown complete");
    Ok(())
}
