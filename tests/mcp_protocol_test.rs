// ABOUTME: Integration tests for JSON-RPC dispatch over the streamable HTTP transport
// ABOUTME: Covers initialize, tool listing, notifications, and error codes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use recruitee_mcp_server::routes::build_streamable_http_router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_router() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path().to_path_buf());
    (build_streamable_http_router(common::test_resources(config)), dir)
}

fn rpc_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn rpc_call(router: axum::Router, payload: Value) -> Value {
    let response = router.oneshot(rpc_request(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_initialize_reports_server_identity() {
    let (router, _dir) = test_router();
    let body = rpc_call(
        router,
        json!({"jsonrpc": "2.0", "method": "initialize", "id": 1}),
    )
    .await;

    assert_eq!(body["id"], 1);
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(body["result"]["serverInfo"]["name"], "Recruitee MCP Server");
    assert!(body["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_ping_and_empty_listings() {
    let (router, _dir) = test_router();

    let body = rpc_call(
        router.clone(),
        json!({"jsonrpc": "2.0", "method": "ping", "id": 2}),
    )
    .await;
    assert_eq!(body["result"], json!({}));

    let body = rpc_call(
        router.clone(),
        json!({"jsonrpc": "2.0", "method": "prompts/list", "id": 3}),
    )
    .await;
    assert_eq!(body["result"]["prompts"], json!([]));

    let body = rpc_call(
        router,
        json!({"jsonrpc": "2.0", "method": "resources/list", "id": 4}),
    )
    .await;
    assert_eq!(body["result"]["resources"], json!([]));
}

#[tokio::test]
async fn test_tools_list_contains_the_catalog() {
    let (router, _dir) = test_router();
    let body = rpc_call(
        router,
        json!({"jsonrpc": "2.0", "method": "tools/list", "id": 5}),
    )
    .await;

    let tools = body["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"search_candidates"));
    assert!(names.contains(&"get_breakdown_metric_data"));
    assert!(names.contains(&"recruitment_report_prompt"));
    // every tool carries an input schema
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn test_unknown_method_is_method_not_found() {
    let (router, _dir) = test_router();
    let body = rpc_call(
        router,
        json!({"jsonrpc": "2.0", "method": "does/not-exist", "id": 6}),
    )
    .await;

    assert_eq!(body["error"]["code"], -32601);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("does/not-exist"));
}

#[tokio::test]
async fn test_wrong_jsonrpc_version_is_invalid_request() {
    let (router, _dir) = test_router();
    let body = rpc_call(
        router,
        json!({"jsonrpc": "1.0", "method": "ping", "id": 7}),
    )
    .await;
    assert_eq!(body["error"]["code"], -32600);
}

#[tokio::test]
async fn test_notification_gets_accepted_without_body() {
    let (router, _dir) = test_router();
    let response = router
        .oneshot(rpc_request(&json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_tool_call_returns_prompt_text() {
    let (router, _dir) = test_router();
    let body = rpc_call(
        router,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": {"name": "instructions", "arguments": {}},
            "id": 8
        }),
    )
    .await;

    assert_eq!(body["result"]["isError"], false);
    assert_eq!(body["result"]["content"][0]["type"], "text");
    assert!(body["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("metric tools"));
}

#[tokio::test]
async fn test_tool_call_empty_query_short_circuits() {
    // an empty full-text query returns no hits without touching the API
    let (router, _dir) = test_router();
    let body = rpc_call(
        router,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": {"name": "search_candidate_by_query", "arguments": {"query": ""}},
            "id": 9
        }),
    )
    .await;

    assert_eq!(body["result"]["isError"], false);
    assert_eq!(body["result"]["structuredContent"], json!([]));
}

#[tokio::test]
async fn test_tool_call_unknown_tool_is_invalid_params() {
    let (router, _dir) = test_router();
    let body = rpc_call(
        router,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": {"name": "rm_rf_everything", "arguments": {}},
            "id": 10
        }),
    )
    .await;

    assert_eq!(body["error"]["code"], -32602);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("rm_rf_everything"));
}

#[tokio::test]
async fn test_tool_call_missing_name_is_invalid_params() {
    let (router, _dir) = test_router();
    let body = rpc_call(
        router,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": {"arguments": {}},
            "id": 11
        }),
    )
    .await;
    assert_eq!(body["error"]["code"], -32602);
}

#[tokio::test]
async fn test_tool_call_bad_arguments_surface_as_tool_error() {
    // an over-limit search is rejected before any network traffic
    let (router, _dir) = test_router();
    let body = rpc_call(
        router,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": {
                "name": "search_candidates",
                "arguments": {"search_filter": {"limit": 20_000}}
            },
            "id": 12
        }),
    )
    .await;

    assert_eq!(body["result"]["isError"], true);
    assert!(body["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("10000"));
}
