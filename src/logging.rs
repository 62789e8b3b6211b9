//! Structured logging initialization
//!
//! The library itself only emits `tracing` events. Binaries and services that
//! embed the router call [`init_logging`] once at startup to install a
//! subscriber.
//!
//! ## Environment Variables
//!
//! | Variable                          | Values                          | Default |
//! |-----------------------------------|---------------------------------|---------|
//! | `TAILROUTER_LOG_LEVEL`            | trace/debug/info/warn/error     | `info`  |
//! | `TAILROUTER_LOG_FORMAT`           | json/pretty                     | `json`  |
//! | `TAILROUTER_LOG_INCLUDE_LOCATION` | true/false                      | `false` |
//!
//! With `TAILROUTER_LOG_FORMAT=pretty` the other two default to `debug` and
//! `true` instead.
//!
//! `RUST_LOG`, when set, takes precedence over `TAILROUTER_LOG_LEVEL`.
//! Events are written to stderr so they never mix with command output.

use anyhow::{anyhow, Result};
use std::env;
use std::io;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-line human-readable output
    Pretty,
}

impl LogFormat {
    /// Parse a format name, case-insensitively. Anything but `pretty` is JSON.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level or filter directive (e.g. `info`, `tailrouter=debug`)
    pub log_level: String,
    /// Output format
    pub format: LogFormat,
    /// Include file:line location (dev only)
    pub include_location: bool,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    ///
    /// `TAILROUTER_LOG_FORMAT=pretty` switches the defaults for the other
    /// variables to [`LogConfig::default_dev`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let format = LogFormat::parse(&lookup("TAILROUTER_LOG_FORMAT").unwrap_or_default());
        let defaults = match format {
            LogFormat::Json => Self::default_prod(),
            LogFormat::Pretty => Self::default_dev(),
        };
        Self {
            log_level: lookup("TAILROUTER_LOG_LEVEL").unwrap_or(defaults.log_level),
            format,
            include_location: lookup("TAILROUTER_LOG_INCLUDE_LOCATION")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.include_location),
        }
    }

    /// Production defaults: info level, JSON output, no source locations
    pub fn default_prod() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            include_location: false,
        }
    }

    /// Development defaults: debug level, pretty output, source locations
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

/// Install the global `tracing` subscriber
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(" PRETTY "), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Json);
    }

    #[test]
    fn test_dev_defaults() {
        let config = LogConfig::default_dev();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.include_location);
    }

    #[test]
    fn test_unset_env_uses_production_defaults() {
        assert_eq!(LogConfig::from_lookup(|_| None), LogConfig::default_prod());
    }

    #[test]
    fn test_pretty_format_switches_to_dev_defaults() {
        let config = LogConfig::from_lookup(|key| {
            (key == "TAILROUTER_LOG_FORMAT").then(|| "pretty".to_string())
        });
        assert_eq!(config, LogConfig::default_dev());
    }

    #[test]
    fn test_explicit_values_override_dev_defaults() {
        let config = LogConfig::from_lookup(|key| match key {
            "TAILROUTER_LOG_FORMAT" => Some("pretty".to_string()),
            "TAILROUTER_LOG_LEVEL" => Some("warn".to_string()),
            "TAILROUTER_LOG_INCLUDE_LOCATION" => Some("false".to_string()),
            _ => None,
        });
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.log_level, "warn");
        assert!(!config.include_location);
    }
}
