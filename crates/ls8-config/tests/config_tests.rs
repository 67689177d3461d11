//! Configuration loading and precedence tests

use ls8_config::{ConfigError, ConfigLoader, ProjectConfig, CONFIG_FILE_NAME};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> std::path::PathBuf {
    let config_path = dir.join(CONFIG_FILE_NAME);
    fs::write(&config_path, content).unwrap();
    config_path
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
#[serial]
fn test_load_when_no_config_exists() {
    let temp_dir = TempDir::new().unwrap();

    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert!(!config.is_project());
    assert_eq!(config.max_steps(), None);
}

#[test]
#[serial]
fn test_load_from_subdirectory_finds_parent() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "[run]\ntrace = true\n");

    let nested = temp_dir.path().join("sub1").join("sub2");
    fs::create_dir_all(&nested).unwrap();

    let config = ConfigLoader::new().load_from_directory(&nested).unwrap();

    assert!(config.trace());
    assert_eq!(config.project_root(), Some(temp_dir.path()));
}

#[test]
#[serial]
fn test_load_from_specific_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[output]\njson = true\n");

    let config = ConfigLoader::new().load_from_file(&path).unwrap();

    assert!(config.json());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = ProjectConfig::load_from_file(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_parse_error_names_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[run\n");
    let err = ProjectConfig::load_from_file(&path).unwrap_err();
    match err {
        ConfigError::TomlParseError { file, .. } => assert_eq!(file, path),
        other => panic!("Expected TomlParseError, got {:?}", other),
    }
}

#[rstest]
#[case("[run]\nmax_steps = -1\n")]
#[case("[run]\nmax_steps = 0\n")]
#[case("[run]\ntrace = \"sometimes\"\n")]
#[case("[machine]\nmemory = 512\n")]
fn test_invalid_configs_rejected(#[case] content: &str) {
    assert!(ProjectConfig::parse(content).is_err());
}

// ============================================================================
// Precedence Tests
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        "[run]\nmax_steps = 100\ntrace = true\nstats = true\n",
    );

    env::set_var("LS8_MAX_STEPS", "5");
    env::set_var("LS8_TRACE", "false");
    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap();
    env::remove_var("LS8_MAX_STEPS");
    env::remove_var("LS8_TRACE");

    assert_eq!(config.max_steps(), Some(5));
    assert!(!config.trace());
    assert!(config.stats());
}
