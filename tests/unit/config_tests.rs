//! Unit tests for dispatch configuration parsing and validation.

use std::time::Duration;

use webview_intercom::{AppError, IpcConfig};

#[test]
fn empty_toml_yields_the_defaults() {
    let config = IpcConfig::from_toml_str("").expect("empty config must parse");
    assert_eq!(config.request_timeout_seconds, 30);
    assert_eq!(config.inbound_queue_capacity, 64);
}

#[test]
fn default_matches_an_empty_document() {
    let parsed = IpcConfig::from_toml_str("").expect("empty config must parse");
    assert_eq!(parsed, IpcConfig::default());
}

#[test]
fn custom_values_parse() {
    let raw = "request_timeout_seconds = 5\ninbound_queue_capacity = 8\n";
    let config = IpcConfig::from_toml_str(raw).expect("config must parse");
    assert_eq!(config.request_timeout_seconds, 5);
    assert_eq!(config.inbound_queue_capacity, 8);
}

#[test]
fn zero_request_timeout_is_rejected() {
    let result = IpcConfig::from_toml_str("request_timeout_seconds = 0\n");
    match result {
        Err(AppError::Config(msg)) => assert!(
            msg.contains("request_timeout_seconds"),
            "error must name the field, got: {msg}"
        ),
        other => panic!("expected Err(AppError::Config), got: {other:?}"),
    }
}

#[test]
fn zero_queue_capacity_is_rejected() {
    let result = IpcConfig::from_toml_str("inbound_queue_capacity = 0\n");
    match result {
        Err(AppError::Config(msg)) => assert!(
            msg.contains("inbound_queue_capacity"),
            "error must name the field, got: {msg}"
        ),
        other => panic!("expected Err(AppError::Config), got: {other:?}"),
    }
}

#[test]
fn invalid_toml_is_a_config_error() {
    let result = IpcConfig::from_toml_str("request_timeout_seconds = [[[");
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn request_timeout_converts_to_a_duration() {
    let config = IpcConfig::from_toml_str("request_timeout_seconds = 12\n").expect("must parse");
    assert_eq!(config.request_timeout(), Duration::from_secs(12));
}
