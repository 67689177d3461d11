//! CLI configuration via environment variables
//!
//! Settings that only affect how the CLI reports, not how programs run.
//! Run settings live in `ls8.toml` (see the `ls8-config` crate).

use std::env;

/// Default log filter when LS8_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default to JSON diagnostic output (LS8_DIAGNOSTICS=json)
    pub default_json: bool,
    /// Disable colored output (LS8_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Log filter directive (LS8_LOG, e.g. `ls8_runtime=trace`)
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("LS8_DIAGNOSTICS")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            no_color: env::var("LS8_NO_COLOR").is_ok() || env::var("NO_COLOR").is_ok(),
            log_filter: env::var("LS8_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
