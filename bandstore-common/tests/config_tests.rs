//! Unit tests for configuration resolution
//!
//! Covers:
//! - Priority order: overrides > TOML file > compiled defaults
//! - Missing TOML file does not prevent startup
//! - Malformed TOML file is reported as a configuration error

use bandstore_common::config::{
    default_database_path, load_toml_config, ConfigOverrides, ServerConfig, TomlConfig,
    DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
};
use bandstore_common::Error;
use std::path::PathBuf;

#[test]
fn test_defaults_when_nothing_configured() {
    let config = ServerConfig::resolve(ConfigOverrides::default(), None);

    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.database_path, default_database_path());
}

#[test]
fn test_default_database_path_file_name() {
    let path = default_database_path();
    assert_eq!(path.file_name().unwrap(), "bands.db");
    assert!(path.to_string_lossy().contains("bandstore"));
}

#[test]
fn test_file_values_beat_defaults() {
    let file = TomlConfig {
        host: Some("0.0.0.0".to_string()),
        port: Some(8080),
        database_path: Some(PathBuf::from("/srv/bands.db")),
        log_level: None,
    };

    let config = ServerConfig::resolve(ConfigOverrides::default(), Some(file));

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.database_path, PathBuf::from("/srv/bands.db"));
    assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_overrides_beat_file_values() {
    let file = TomlConfig {
        host: Some("0.0.0.0".to_string()),
        port: Some(8080),
        database_path: Some(PathBuf::from("/srv/bands.db")),
        log_level: Some("warn".to_string()),
    };
    let overrides = ConfigOverrides {
        host: None,
        port: Some(9090),
        database_path: Some(PathBuf::from("/tmp/override.db")),
        log_level: Some("debug".to_string()),
    };

    let config = ServerConfig::resolve(overrides, Some(file));

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 9090);
    assert_eq!(config.database_path, PathBuf::from("/tmp/override.db"));
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.bind_address(), "0.0.0.0:9090");
}

#[test]
fn test_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let loaded = load_toml_config(&path).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
host = "192.168.1.10"
port = 4000
database_path = "/var/lib/bandstore/bands.db"
log_level = "bandstore_api=debug"
"#,
    )
    .unwrap();

    let loaded = load_toml_config(&path).unwrap().unwrap();
    assert_eq!(loaded.host.as_deref(), Some("192.168.1.10"));
    assert_eq!(loaded.port, Some(4000));
    assert_eq!(loaded.database_path, Some(PathBuf::from("/var/lib/bandstore/bands.db")));
    assert_eq!(loaded.log_level.as_deref(), Some("bandstore_api=debug"));
}

#[test]
fn test_partial_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 4001\n").unwrap();

    let loaded = load_toml_config(&path).unwrap().unwrap();
    assert_eq!(loaded, TomlConfig { port: Some(4001), ..TomlConfig::default() });
}

#[test]
fn test_malformed_toml_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"\n").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_unknown_toml_key_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "prot = 4000\n").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_load_with_explicit_file_applies_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "host = \"0.0.0.0\"\nport = 5000\n").unwrap();

    let overrides = ConfigOverrides {
        port: Some(5001),
        ..ConfigOverrides::default()
    };
    let config = ServerConfig::load(Some(path), overrides).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 5001);
}
