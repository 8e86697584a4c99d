//! Janitor state machine
//!
//! ```text
//!   Sleeping(Normal) ──timer──► Running ──ok──► Sleeping(Normal)
//!   Sleeping(Backoff) ─timer──► Running ──err─► Sleeping(Backoff)
//! ```
//!
//! There is no terminal state; the loop only ends when it is told to stop.

use std::time::Duration;

use super::error::JanitorError;

/// Default pause between successful cycles
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

/// Default pause after a failed cycle
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(60);

/// Timing for the retention loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JanitorConfig {
    /// Sleep after a successful cycle
    pub interval: Duration,
    /// Sleep after a failed cycle
    pub backoff: Duration,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

/// Which sleep the janitor is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Normal,
    Backoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JanitorState {
    Running,
    Sleeping(Cadence),
}

impl JanitorState {
    /// State to enter once a cycle has finished
    pub fn after_cycle(outcome: &Result<usize, JanitorError>) -> Self {
        match outcome {
            Ok(_) => JanitorState::Sleeping(Cadence::Normal),
            Err(_) => JanitorState::Sleeping(Cadence::Backoff),
        }
    }

    /// How long to stay in this state, `None` while running
    pub fn sleep_for(&self, config: &JanitorConfig) -> Option<Duration> {
        match self {
            JanitorState::Running => None,
            JanitorState::Sleeping(Cadence::Normal) => Some(config.interval),
            JanitorState::Sleeping(Cadence::Backoff) => Some(config.backoff),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_sleeps_normal_interval() {
        let state = JanitorState::after_cycle(&Ok(3));
        assert_eq!(state, JanitorState::Sleeping(Cadence::Normal));
        assert_eq!(
            state.sleep_for(&JanitorConfig::default()),
            Some(Duration::from_secs(300))
        );
    }

    #[test]
    fn test_failure_sleeps_backoff() {
        let state = JanitorState::after_cycle(&Err(JanitorError::EvictionCancelled));
        assert_eq!(state, JanitorState::Sleeping(Cadence::Backoff));
        assert_eq!(
            state.sleep_for(&JanitorConfig::default()),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_running_has_no_sleep() {
        assert_eq!(JanitorState::Running.sleep_for(&JanitorConfig::default()), None);
    }
}
