use bankhub::config::{AppConfig, DEFAULT_API_BASE_URL};
use bankhub::Error;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_layered_loading() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bankhub.toml");

    // Missing file: defaults apply
    let config = AppConfig::load(Some(&path)).expect("defaults should load");
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

    fs::write(
        &path,
        r#"
api_base_url = "http://bank.internal:9000"
toast_duration_ms = 1200
log_level = "debug"
"#,
    )
    .unwrap();

    let config = AppConfig::load(Some(&path)).expect("file should load");
    assert_eq!(config.api_base_url, "http://bank.internal:9000");
    assert_eq!(config.toast_duration(), Duration::from_millis(1200));
    assert_eq!(config.log_level, "debug");

    // Environment beats the file. Only this test touches BANKHUB_* variables.
    std::env::set_var("BANKHUB_API_BASE_URL", "http://from-env:8082");
    let config = AppConfig::load(Some(&path));
    std::env::remove_var("BANKHUB_API_BASE_URL");

    let config = config.expect("env override should load");
    assert_eq!(config.api_base_url, "http://from-env:8082");
    assert_eq!(config.toast_duration(), Duration::from_millis(1200));
}

#[test]
fn test_invalid_file_is_config_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bankhub.toml");
    fs::write(&path, "api_base_url = \"ftp://nope\"\n").unwrap();

    match AppConfig::load_file(&path) {
        Err(Error::Config(message)) => assert!(message.contains("http://")),
        other => panic!("Expected config error, got {:?}", other),
    }
}

#[test]
fn test_save_then_load_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("bankhub.toml");

    let config = AppConfig::default()
        .with_api_base_url("https://bank.example.com")
        .with_log_level("warn");
    config.save(&path).expect("save should create parent dirs");

    let loaded = AppConfig::load_file(&path).expect("saved file should load");
    assert_eq!(loaded.api_base_url, "https://bank.example.com");
    assert_eq!(loaded.log_level, "warn");
    assert_eq!(loaded.request_timeout(), config.request_timeout());
}
