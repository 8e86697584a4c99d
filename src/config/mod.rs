//! Runtime configuration loaded from environment variables
//!
//! | Variable                        | Default    |
//! |---------------------------------|------------|
//! | `WEBHOOK_HOST`                  | `0.0.0.0`  |
//! | `WEBHOOK_PORT`                  | `5000`     |
//! | `WEBHOOK_RETENTION_SECS`        | `3600`     |
//! | `WEBHOOK_CLEANUP_INTERVAL_SECS` | `300`      |
//! | `WEBHOOK_CLEANUP_BACKOFF_SECS`  | `60`       |
//! | `WEBHOOK_MAX_BODY_BYTES`        | `16777216` |

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::api::DEFAULT_MAX_BODY_BYTES;
use crate::event_store::DEFAULT_RETENTION;
use crate::janitor::{JanitorConfig, DEFAULT_BACKOFF, DEFAULT_INTERVAL};

pub const HOST_VAR: &str = "WEBHOOK_HOST";
pub const PORT_VAR: &str = "WEBHOOK_PORT";
pub const RETENTION_VAR: &str = "WEBHOOK_RETENTION_SECS";
pub const INTERVAL_VAR: &str = "WEBHOOK_CLEANUP_INTERVAL_SECS";
pub const BACKOFF_VAR: &str = "WEBHOOK_CLEANUP_BACKOFF_SECS";
pub const MAX_BODY_VAR: &str = "WEBHOOK_MAX_BODY_BYTES";

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,webhook_inspector=debug";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },

    #[error("WEBHOOK_HOST must be an IP address, got {0:?}")]
    InvalidAddress(String),
}

/// Server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Retention window, also the window for dashboard and `/stats`
    pub retention: Duration,
    pub janitor: JanitorConfig,
    /// Largest accepted `POST /webhook` body
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            retention: DEFAULT_RETENTION,
            janitor: JanitorConfig::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_VAR).unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
                var: PORT_VAR,
                value: raw,
            })?,
            None => 5000,
        };

        let ip = host
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidAddress(host.clone()))?;
        let bind_addr = SocketAddr::new(ip, port);

        Ok(Self {
            bind_addr,
            retention: seconds(&lookup, RETENTION_VAR, DEFAULT_RETENTION)?,
            janitor: JanitorConfig {
                interval: seconds(&lookup, INTERVAL_VAR, DEFAULT_INTERVAL)?,
                backoff: seconds(&lookup, BACKOFF_VAR, DEFAULT_BACKOFF)?,
            },
            max_body_bytes: positive(&lookup, MAX_BODY_VAR)?
                .map_or(Ok(DEFAULT_MAX_BODY_BYTES), |bytes| {
                    usize::try_from(bytes).map_err(|_| ConfigError::InvalidNumber {
                        var: MAX_BODY_VAR,
                        value: bytes.to_string(),
                    })
                })?,
        })
    }
}

/// Parse a positive whole number of seconds, falling back to `default` when unset
fn seconds<F>(lookup: &F, var: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(positive(lookup, var)?.map_or(default, Duration::from_secs))
}

/// Parse a positive integer, `None` when unset
fn positive<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };

    let value = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw })?;
    if value == 0 {
        return Err(ConfigError::Zero { var });
    }
    Ok(Some(value))
}
