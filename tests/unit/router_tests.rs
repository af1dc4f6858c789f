//! Unit tests for inbound routing and event delivery.

use serde_json::json;
use tokio_util::sync::CancellationToken;

use webview_intercom::dispatch::{Connection, InboundEvent};
use webview_intercom::protocol::notifications::ShowCodemark;
use webview_intercom::IpcConfig;

use super::support::FakeChannel;

// ── Host-initiated traffic ───────────────────────────────────────────────────

/// A host request surfaces to the consumer, and the reply echoes its id with
/// the method field absent.
#[tokio::test]
async fn host_request_is_surfaced_and_the_reply_echoes_its_id() {
    let (channel, mut outbound_rx, inbound_tx) = FakeChannel::new();
    let (conn, mut events, _router) =
        Connection::spawn(channel, &IpcConfig::default(), CancellationToken::new())
            .expect("spawn must succeed");

    inbound_tx
        .send(json!({
            "id": "h-1",
            "method": "webview/codemark/new",
            "params": {"uri": "file:///src/lib.rs"}
        }))
        .await
        .expect("inbound send");

    let event = events.recv().await.expect("event must be delivered");
    let request = match event {
        InboundEvent::Request(request) => request,
        other => panic!("expected a request event, got: {other:?}"),
    };
    assert_eq!(request.id, "h-1");
    assert_eq!(request.method, "webview/codemark/new");

    conn.respond(&request.id, json!({"accepted": true}))
        .await
        .expect("respond must succeed");

    let reply = outbound_rx.recv().await.expect("reply must be sent");
    assert_eq!(reply["id"], "h-1");
    assert_eq!(reply["params"], json!({"accepted": true}));
    assert!(reply.get("method").is_none(), "responses carry no method");
    assert!(reply.get("error").is_none());
}

#[tokio::test]
async fn respond_error_carries_the_failure_payload() {
    let (channel, mut outbound_rx, _inbound_tx) = FakeChannel::new();
    let (conn, _events, _router) =
        Connection::spawn(channel, &IpcConfig::default(), CancellationToken::new())
            .expect("spawn must succeed");

    conn.respond_error("h-2", json!({"message": "unknown codemark"}))
        .await
        .expect("respond_error must succeed");

    let reply = outbound_rx.recv().await.expect("reply must be sent");
    assert_eq!(reply["id"], "h-2");
    assert_eq!(reply["error"], json!({"message": "unknown codemark"}));
    assert!(reply.get("params").is_none());
}

#[tokio::test]
async fn host_notification_is_surfaced_with_a_decodable_payload() {
    let (channel, _outbound_rx, inbound_tx) = FakeChannel::new();
    let (_conn, mut events, _router) =
        Connection::spawn(channel, &IpcConfig::default(), CancellationToken::new())
            .expect("spawn must succeed");

    inbound_tx
        .send(json!({
            "method": "webview/codemark/show",
            "params": {"codemarkId": "cm-3", "sourceUri": "file:///src/main.rs"}
        }))
        .await
        .expect("inbound send");

    let event = events.recv().await.expect("event must be delivered");
    let notification = match event {
        InboundEvent::Notification(notification) => notification,
        other => panic!("expected a notification event, got: {other:?}"),
    };
    assert_eq!(notification.method, "webview/codemark/show");

    let payload: ShowCodemark =
        serde_json::from_value(notification.params.expect("params must be present"))
            .expect("payload must decode");
    assert_eq!(payload.codemark_id, "cm-3");
    assert_eq!(payload.source_uri.as_deref(), Some("file:///src/main.rs"));
}

// ── Resilience ───────────────────────────────────────────────────────────────

/// Unroutable and malformed payloads are dropped without taking the router
/// down; later traffic still flows.
#[tokio::test]
async fn bad_payloads_are_dropped_and_routing_continues() {
    let (channel, _outbound_rx, inbound_tx) = FakeChannel::new();
    let (_conn, mut events, _router) =
        Connection::spawn(channel, &IpcConfig::default(), CancellationToken::new())
            .expect("spawn must succeed");

    // Neither method nor id.
    inbound_tx
        .send(json!({"params": {"x": 1}}))
        .await
        .expect("inbound send");
    // Not an object at all.
    inbound_tx.send(json!(42)).await.expect("inbound send");
    // A valid notification must still come through.
    inbound_tx
        .send(json!({"method": "webview/review/show", "params": {"reviewId": "r-1"}}))
        .await
        .expect("inbound send");

    let event = events.recv().await.expect("router must survive bad payloads");
    match event {
        InboundEvent::Notification(notification) => {
            assert_eq!(notification.method, "webview/review/show");
        }
        other => panic!("expected the surviving notification, got: {other:?}"),
    }
}

#[tokio::test]
async fn stale_response_is_dropped_without_side_effects() {
    let (channel, _outbound_rx, inbound_tx) = FakeChannel::new();
    let (_conn, mut events, _router) =
        Connection::spawn(channel, &IpcConfig::default(), CancellationToken::new())
            .expect("spawn must succeed");

    // No request with this id is outstanding.
    inbound_tx
        .send(json!({"id": "ghost", "params": {"ok": true}}))
        .await
        .expect("inbound send");
    inbound_tx
        .send(json!({"method": "webview/stream/show", "params": {"streamId": "s-1"}}))
        .await
        .expect("inbound send");

    let event = events.recv().await.expect("router must stay alive");
    match event {
        InboundEvent::Notification(notification) => {
            assert_eq!(notification.method, "webview/stream/show");
        }
        other => panic!("expected the follow-up notification, got: {other:?}"),
    }
}
