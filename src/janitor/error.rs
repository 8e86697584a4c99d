//! Janitor cycle errors

use tokio::task::JoinError;

/// Why an eviction cycle did not complete
#[derive(Debug, thiserror::Error)]
pub enum JanitorError {
    #[error("eviction panicked: {0}")]
    EvictionPanicked(String),

    #[error("eviction task was cancelled")]
    EvictionCancelled,
}

impl From<JoinError> for JanitorError {
    fn from(err: JoinError) -> Self {
        if !err.is_panic() {
            return JanitorError::EvictionCancelled;
        }

        let panic = err.into_panic();
        let message = if let Some(msg) = panic.downcast_ref::<&str>() {
            (*msg).to_string()
        } else if let Some(msg) = panic.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic payload".to_string()
        };
        JanitorError::EvictionPanicked(message)
    }
}
