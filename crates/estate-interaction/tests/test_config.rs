use std::collections::HashMap;
use std::path::PathBuf;

use estate_core::config::{ClientConfig, DEFAULT_API_BASE_URL};
use estate_interaction::config::{
    ConfigOverrides, ENV_API_BASE_URL, ENV_DOWNLOAD_DIR, ENV_REQUEST_TIMEOUT_SECS, apply_env,
    read_config_file,
};
use tempfile::TempDir;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = read_config_file(&temp_dir.path().join("config.toml")).expect("Should load defaults");

    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn test_file_values_are_read() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "api_base_url = \"http://analytics.internal:8000\"\nrequest_timeout_secs = 20\n",
    )
    .unwrap();

    let config = read_config_file(&config_path).expect("Should parse config");

    assert_eq!(config.api_base_url, "http://analytics.internal:8000");
    assert_eq!(config.request_timeout_secs, Some(20));
    assert!(config.download_dir.is_none());
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "api_base_url = [unterminated").unwrap();

    let err = read_config_file(&config_path).unwrap_err();

    assert!(err.is_config());
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_env_overrides_file() {
    let config = apply_env(
        ClientConfig::default(),
        env_of(&[
            (ENV_API_BASE_URL, "https://estate.example"),
            (ENV_DOWNLOAD_DIR, "/tmp/estate"),
            (ENV_REQUEST_TIMEOUT_SECS, "15"),
        ]),
    )
    .unwrap();

    assert_eq!(config.api_base_url, "https://estate.example");
    assert_eq!(config.download_dir, Some(PathBuf::from("/tmp/estate")));
    assert_eq!(config.request_timeout_secs, Some(15));
}

#[test]
fn test_blank_env_values_are_ignored() {
    let config = apply_env(ClientConfig::default(), env_of(&[(ENV_API_BASE_URL, "  ")])).unwrap();

    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn test_invalid_timeout_is_config_error() {
    let err = apply_env(
        ClientConfig::default(),
        env_of(&[(ENV_REQUEST_TIMEOUT_SECS, "soon")]),
    )
    .unwrap_err();

    assert!(err.is_config());
}

#[test]
fn test_overrides_win_over_everything() {
    let from_env = apply_env(
        ClientConfig::default(),
        env_of(&[(ENV_API_BASE_URL, "https://from-env.example")]),
    )
    .unwrap();

    let overrides = ConfigOverrides {
        api_base_url: Some("http://localhost:9000".to_string()),
        download_dir: None,
        request_timeout_secs: Some(5),
    };
    let config = overrides.apply(from_env);

    assert_eq!(config.api_base_url, "http://localhost:9000");
    assert_eq!(config.request_timeout_secs, Some(5));
    assert!(config.download_dir.is_none());
}
