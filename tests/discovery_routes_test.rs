// ABOUTME: Integration tests for the OAuth discovery and informational endpoints
// ABOUTME: Verifies RFC 8414 / RFC 8707 metadata and the static registration payload
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use recruitee_mcp_server::routes::build_streamable_http_router;
use serde_json::Value;
use tower::ServiceExt;

async fn get_json(router: axum::Router, uri: &str) -> Value {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_router() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path().to_path_buf());
    (build_streamable_http_router(common::test_resources(config)), dir)
}

#[tokio::test]
async fn test_authorization_server_metadata() {
    let (router, _dir) = test_router();
    let metadata = get_json(router, "/.well-known/oauth-authorization-server").await;

    assert_eq!(metadata["issuer"], "https://mcp.example.com");
    assert_eq!(
        metadata["registration_endpoint"],
        "https://mcp.example.com/register"
    );
    assert_eq!(
        metadata["authorization_endpoint"],
        "https://accounts.google.com/o/oauth2/v2/auth"
    );
    assert_eq!(metadata["token_endpoint"], "https://oauth2.googleapis.com/token");
    assert_eq!(metadata["grant_types_supported"], serde_json::json!(["authorization_code"]));
    assert_eq!(
        metadata["code_challenge_methods_supported"],
        serde_json::json!(["S256"])
    );
    assert_eq!(
        metadata["allowed_domains"],
        serde_json::json!(["appunite.com", "appunite.pl"])
    );
}

#[tokio::test]
async fn test_protected_resource_metadata() {
    let (router, _dir) = test_router();
    let metadata = get_json(router, "/.well-known/oauth-protected-resource").await;

    assert_eq!(metadata["resource"], "https://mcp.example.com");
    assert_eq!(
        metadata["authorization_servers"],
        serde_json::json!(["https://mcp.example.com"])
    );
    assert_eq!(metadata["bearer_methods_supported"], serde_json::json!(["header"]));
    assert_eq!(
        metadata["resource_documentation"],
        "https://mcp.example.com/docs"
    );
}

#[tokio::test]
async fn test_client_registration_returns_static_credentials() {
    let (router, _dir) = test_router();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let client: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(client["client_id"], "client-id.apps.googleusercontent.com");
    assert_eq!(client["client_secret"], "client-secret");
    assert_eq!(client["token_endpoint_auth_method"], "none");
    assert_eq!(client["application_type"], "native");
    assert_eq!(client["scope"], "openid email profile");
    let redirect_uris = client["redirect_uris"].as_array().unwrap();
    assert_eq!(redirect_uris.len(), 6);
    assert!(redirect_uris.contains(&Value::String(
        "https://claude.ai/api/mcp/auth_callback".into()
    )));
    assert!(redirect_uris.contains(&Value::String(
        "http://localhost:3000/callback".into()
    )));
}

#[tokio::test]
async fn test_server_info_and_actions() {
    let (router, _dir) = test_router();

    let info = get_json(router.clone(), "/").await;
    assert_eq!(info["name"], "Recruitee MCP Server");
    assert_eq!(info["mcp_version"], "2024-11-05");
    assert_eq!(info["endpoints"]["mcp"], "/mcp");
    assert_eq!(info["authentication"], "OAuth 2.0 (Google)");

    let actions = get_json(router.clone(), "/actions").await;
    assert_eq!(actions["actions"][0]["name"], "search");
    assert_eq!(actions["base_url"], "https://mcp.example.com");

    // /search and /action/search serve the same description
    let search = get_json(router.clone(), "/search").await;
    let action_search = get_json(router, "/action/search").await;
    assert_eq!(search, action_search);
    assert_eq!(search["action"], "search");
}
