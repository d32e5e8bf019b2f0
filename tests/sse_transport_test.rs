// ABOUTME: Integration tests for the SSE transport: session handshake and delivery
// ABOUTME: Reads raw event-stream frames off the response body
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use recruitee_mcp_server::routes::build_sse_router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn sse_router() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path().to_path_buf());
    (build_sse_router(common::test_resources(config), "/sse"), dir)
}

async fn open_stream(router: axum::Router) -> axum::response::Response {
    let response = router
        .oneshot(Request::builder().uri("/sse").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "text/event-stream"
    );
    response
}

/// Pull the next data frame off the stream as text
async fn next_frame(body: &mut Body) -> String {
    let frame = body.frame().await.unwrap().unwrap();
    let bytes = frame.into_data().unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn session_from_endpoint_frame(frame: &str) -> String {
    let (_, session) = frame
        .split_once("session=")
        .expect("endpoint frame carries a session id");
    session.trim().to_string()
}

fn post_message(session: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/sse/messages?session={session}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_stream_opens_with_endpoint_event() {
    let (router, _dir) = sse_router();
    let response = open_stream(router).await;
    let mut body = response.into_body();

    let frame = next_frame(&mut body).await;
    assert!(frame.contains("event: endpoint"));
    assert!(frame.contains("/sse/messages?session="));
}

#[tokio::test]
async fn test_response_is_delivered_to_the_stream() {
    let (router, _dir) = sse_router();
    let response = open_stream(router.clone()).await;
    let mut body = response.into_body();

    let session = session_from_endpoint_frame(&next_frame(&mut body).await);

    let post = router
        .oneshot(post_message(
            &session,
            &json!({"jsonrpc": "2.0", "method": "ping", "id": 42}),
        ))
        .await
        .unwrap();
    assert_eq!(post.status(), StatusCode::ACCEPTED);

    let frame = next_frame(&mut body).await;
    assert!(frame.contains("event: message"));
    let data = frame
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .unwrap();
    let response: Value = serde_json::from_str(data).unwrap();
    assert_eq!(response["id"], 42);
    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let (router, _dir) = sse_router();
    let response = router
        .oneshot(post_message(
            "no-such-session",
            &json!({"jsonrpc": "2.0", "method": "ping", "id": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "unknown session");
}

#[tokio::test]
async fn test_notifications_are_accepted_without_delivery() {
    // notifications never produce a response, so no session lookup happens
    let (router, _dir) = sse_router();
    let response = router
        .oneshot(post_message(
            "no-such-session",
            &json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}
