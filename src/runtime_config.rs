//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `TAILROUTER_SLOW_LOOKUP_US`
//!
//! Lookups slower than this many microseconds are logged at `warn` level with
//! their duration. Accepts a decimal integer.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use tailrouter::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow lookup threshold: {:?}", config.slow_lookup);
//! ```

use std::env;
use std::time::Duration;

/// Environment variable holding the slow-lookup threshold in microseconds
pub const SLOW_LOOKUP_ENV: &str = "TAILROUTER_SLOW_LOOKUP_US";

const DEFAULT_SLOW_LOOKUP_US: u64 = 1_000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Lookups taking longer than this are reported (default: 1 ms)
    pub slow_lookup: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_lookup: Duration::from_micros(DEFAULT_SLOW_LOOKUP_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let slow_lookup_us = lookup(SLOW_LOOKUP_ENV)
            .and_then(|val| val.trim().parse().ok())
            .unwrap_or(DEFAULT_SLOW_LOOKUP_US);
        RuntimeConfig {
            slow_lookup: Duration::from_micros(slow_lookup_us),
        }
    }
}
