//! Retention Janitor - background eviction of expired webhooks
//!
//! Runs one eviction cycle immediately on start, then keeps cycling on a
//! fixed cadence until it is shut down. A failed cycle (the eviction
//! panicked) is logged and retried after a shorter backoff; the loop itself
//! never dies from a cycle failure.

mod error;
mod state;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::event_store::EventStore;

pub use error::JanitorError;
pub use state::{Cadence, JanitorConfig, JanitorState, DEFAULT_BACKOFF, DEFAULT_INTERVAL};

/// Something the janitor can sweep
pub trait Evict: Send + Sync + 'static {
    /// Drop expired items, returning how many were removed
    fn evict_expired(&self) -> usize;
}

impl Evict for EventStore {
    fn evict_expired(&self) -> usize {
        self.evict(self.retention())
    }
}

/// Background task that keeps the store bounded
pub struct RetentionJanitor<E: Evict> {
    evictor: Arc<E>,
    config: JanitorConfig,
    /// Published so a `JanitorHandle` can observe the loop
    state: watch::Sender<JanitorState>,
}

impl<E: Evict> RetentionJanitor<E> {
    pub fn new(evictor: Arc<E>, config: JanitorConfig) -> Self {
        let (state, _) = watch::channel(JanitorState::Sleeping(Cadence::Normal));
        Self {
            evictor,
            config,
            state,
        }
    }

    /// Run a single eviction on the blocking pool
    ///
    /// A panic inside the eviction comes back as `JanitorError::EvictionPanicked`.
    pub async fn run_cycle(&self) -> Result<usize, JanitorError> {
        let evictor = self.evictor.clone();
        let removed = tokio::task::spawn_blocking(move || evictor.evict_expired()).await?;
        Ok(removed)
    }

    /// Cycle until `shutdown` flips to `true` or its sender is dropped
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            backoff_secs = self.config.backoff.as_secs(),
            "Retention janitor started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            self.state.send_replace(JanitorState::Running);
            let outcome = self.run_cycle().await;
            match &outcome {
                Ok(removed) => tracing::debug!(removed, "Eviction cycle complete"),
                Err(e) => tracing::error!(error = %e, "Error in cleanup worker"),
            }

            let next = JanitorState::after_cycle(&outcome);
            self.state.send_replace(next);
            let delay = next.sleep_for(&self.config).unwrap_or(self.config.interval);

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Retention janitor stopped");
    }

    /// Start the loop on the runtime and return a handle that can stop it
    pub fn spawn(self) -> JanitorHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let state = self.state.subscribe();
        let task = tokio::spawn(self.run(shutdown_rx));
        JanitorHandle {
            shutdown: shutdown_tx,
            state,
            task,
        }
    }
}

/// Owner of a running janitor
///
/// Dropping the handle also stops the loop at its next sleep.
pub struct JanitorHandle {
    shutdown: watch::Sender<bool>,
    state: watch::Receiver<JanitorState>,
    task: JoinHandle<()>,
}

impl JanitorHandle {
    /// Signal the loop to stop and wait for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Retention janitor task failed");
        }
    }

    /// Where the loop currently is
    pub fn state(&self) -> JanitorState {
        *self.state.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
