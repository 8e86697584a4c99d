//! Utility functions and helpers
//!
//! This module contains timestamp formatting and HTML escaping.

pub mod html;
pub mod time;

pub use html::escape;
pub use time::{current_timestamp, to_iso8601, to_readable};
