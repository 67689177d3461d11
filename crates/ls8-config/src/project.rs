//! Project Configuration (ls8.toml)
//!
//! ```toml
//! [run]
//! max_steps = 100000
//! trace = false
//! stats = false
//!
//! [output]
//! json = false
//! ```

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project configuration from ls8.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Execution settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunConfig>,

    /// Reporting settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Execution configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Abort after this many instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u64>,

    /// Print a machine-state line per instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<bool>,

    /// Print per-opcode counts after the run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<bool>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Report fatal errors as JSON diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::TomlParseError { error, .. } => ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: Path::new(crate::CONFIG_FILE_NAME).to_path_buf(),
            error: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.run.as_ref().and_then(|run| run.max_steps) == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "run.max_steps".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Get the run section, creating it if absent
    pub fn run_mut(&mut self) -> &mut RunConfig {
        self.run.get_or_insert_with(RunConfig::default)
    }

    /// Merge another project config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &ProjectConfig) {
        if let Some(run) = &other.run {
            let mine = self.run_mut();
            if run.max_steps.is_some() {
                mine.max_steps = run.max_steps;
            }
            if run.trace.is_some() {
                mine.trace = run.trace;
            }
            if run.stats.is_some() {
                mine.stats = run.stats;
            }
        }
        if let Some(output) = &other.output {
            if output.json.is_some() {
                self.output.get_or_insert_with(OutputConfig::default).json = output.json;
            }
        }
    }
}
