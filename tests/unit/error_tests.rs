//! Unit tests for `AppError` display formats and error behavior.

use serde_json::json;
use webview_intercom::AppError;

#[test]
fn host_unavailable_display_starts_with_its_prefix() {
    let err = AppError::HostUnavailable("host must provide a channel factory".into());
    assert!(err.to_string().starts_with("host unavailable:"));
}

#[test]
fn ipc_error_display_includes_message() {
    let err = AppError::Ipc("stream closed".into());
    assert_eq!(err.to_string(), "ipc: stream closed");
}

#[test]
fn error_messages_carry_no_trailing_period() {
    let err = AppError::Timeout("no response within 30s".into());
    let s = err.to_string();
    assert!(
        !s.ends_with('.'),
        "error message must not end with a period: {s}"
    );
}

#[test]
fn unroutable_is_distinct_from_protocol() {
    let unroutable = AppError::Unroutable("no method or id".into());
    let protocol = AppError::Protocol("no method or id".into());
    assert_ne!(unroutable.to_string(), protocol.to_string());
    assert!(unroutable.to_string().starts_with("unroutable:"));
    assert!(protocol.to_string().starts_with("protocol:"));
}

#[test]
fn response_error_displays_the_payload() {
    let err = AppError::Response(json!({"message": "denied"}));
    let s = err.to_string();
    assert!(s.starts_with("response error:"));
    assert!(s.contains("denied"));
}

#[test]
fn app_error_implements_std_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(AppError::Config("bad value".into()));
    assert_eq!(err.to_string(), "config: bad value");
}

#[test]
fn debug_representation_names_the_variant() {
    let err = AppError::Timeout("read timeout".into());
    let debug = format!("{err:?}");
    assert!(debug.contains("Timeout"));
    assert!(debug.contains("read timeout"));
}
