//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::project::ProjectConfig;
use crate::{ConfigError, ConfigResult, CONFIG_FILE_NAME};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads configuration and merges it with proper precedence:
/// 1. Project config (./ls8.toml) - lowest priority
/// 2. Environment variables (LS8_*) - overrides project
/// 3. CLI flags - highest priority (handled by caller)
#[derive(Debug, Default)]
pub struct ConfigLoader;

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project configuration (with environment overrides applied)
    pub project: ProjectConfig,

    /// Directory where ls8.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find ls8.toml, then applies
    /// environment variable overrides.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        let project_config = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project: project_config,
            project_root,
        })
    }

    /// Load configuration from a specific config file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ProjectConfig::load_from_file(config_path)?;
        let project_config = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project: project_config,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, ProjectConfig::default())),
            }
        }
    }

    /// Apply environment variable overrides to project config
    ///
    /// Recognised variables: LS8_MAX_STEPS, LS8_TRACE, LS8_STATS
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if let Ok(max_steps) = env::var("LS8_MAX_STEPS") {
            let parsed = max_steps
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: "LS8_MAX_STEPS".to_string(),
                    reason: format!("'{}' is not a positive integer", max_steps),
                })?;
            config.run_mut().max_steps = Some(parsed);
        }

        if let Ok(trace) = env::var("LS8_TRACE") {
            config.run_mut().trace = Some(parse_bool(&trace));
        }

        if let Ok(stats) = env::var("LS8_STATS") {
            config.run_mut().stats = Some(parse_bool(&stats));
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

impl Config {
    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if an ls8.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Instruction limit, if any
    pub fn max_steps(&self) -> Option<u64> {
        self.project.run.as_ref().and_then(|r| r.max_steps)
    }

    /// Whether tracing is enabled (default: false)
    pub fn trace(&self) -> bool {
        self.project
            .run
            .as_ref()
            .and_then(|r| r.trace)
            .unwrap_or(false)
    }

    /// Whether execution statistics are enabled (default: false)
    pub fn stats(&self) -> bool {
        self.project
            .run
            .as_ref()
            .and_then(|r| r.stats)
            .unwrap_or(false)
    }

    /// Whether JSON diagnostics are enabled (default: false)
    pub fn json(&self) -> bool {
        self.project
            .output
            .as_ref()
            .and_then(|o| o.json)
            .unwrap_or(false)
    }
}
