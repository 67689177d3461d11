//! LS-8 Configuration System
//!
//! Provides run configuration for the `ls8` emulator:
//! - Project configuration (`ls8.toml`)
//! - Environment variable overrides (`LS8_*`)
//!
//! # Configuration Hierarchy
//!
//! Configuration is merged in the following order (later overrides earlier):
//! 1. Project config (`ls8.toml`, found by walking up from the start directory)
//! 2. Environment variables (`LS8_*`)
//! 3. CLI flags (applied by the caller)
//!
//! # Example
//!
//! ```no_run
//! use ls8_config::ConfigLoader;
//! use std::path::Path;
//!
//! let loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("max steps: {:?}", config.max_steps());
//! ```

pub mod loader;
pub mod project;

use std::path::PathBuf;
use thiserror::Error;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "ls8.toml";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use loader::{Config, ConfigLoader};
pub use project::{OutputConfig, ProjectConfig, RunConfig};
