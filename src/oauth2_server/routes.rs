// ABOUTME: Axum handlers for OAuth metadata, client registration, and info endpoints
// ABOUTME: All payloads are static per deployment and derived from the loaded config
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use crate::constants::{auth, protocol, routes};
use crate::mcp::resources::ServerResources;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Discovery and informational routes
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .route("/", get(server_info))
        .route(routes::OAUTH_METADATA_PATH, get(oauth_metadata))
        .route(routes::PROTECTED_RESOURCE_PATH, get(protected_resource_metadata))
        .route("/register", post(register_client))
        .route("/actions", get(actions_list))
        .route("/action/search", get(search_action))
        .route("/search", get(search_action))
        .with_state(resources)
}

/// RFC 8414 authorization server metadata.
///
/// Clients talk directly to Google; the issuer is this deployment.
async fn oauth_metadata(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
    let issuer = resources.config.issuer_url();
    Json(json!({
        "issuer": issuer,
        "authorization_endpoint": auth::GOOGLE_AUTH_URL,
        "token_endpoint": auth::GOOGLE_TOKEN_URL,
        "userinfo_endpoint": auth::GOOGLE_USERINFO_URL,
        "registration_endpoint": format!("{issuer}/register"),
        "grant_types_supported": ["authorization_code"],
        "response_types_supported": ["code"],
        "scopes_supported": ["openid", "email", "profile"],
        "subject_types_supported": ["public"],
        "id_token_signing_alg_values_supported": ["RS256"],
        "code_challenge_methods_supported": ["S256"],
        "response_modes_supported": ["query", "fragment"],
        "default_scopes": ["openid", "email", "profile"],
        "allowed_domains": resources.config.auth.allowed_domains,
    }))
}

/// RFC 8707 protected resource metadata
async fn protected_resource_metadata(
    State(resources): State<Arc<ServerResources>>,
) -> Json<Value> {
    let issuer = resources.config.issuer_url();
    Json(json!({
        "resource": issuer,
        "authorization_servers": [issuer],
        "scopes_supported": ["openid", "email", "profile"],
        "bearer_methods_supported": ["header"],
        "resource_documentation": format!("{issuer}/docs"),
    }))
}

/// Static client registration.
///
/// Nothing is persisted; every client receives the preconfigured Google
/// credentials and the known-good redirect URI list.
async fn register_client(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
    Json(json!({
        "client_id": resources.config.auth.google_client_id,
        "client_secret": resources.config.auth.google_client_secret,
        "redirect_uris": auth::CLIENT_REDIRECT_URIS,
        "grant_types": ["authorization_code"],
        "response_types": ["code"],
        "application_type": "native",
        "token_endpoint_auth_method": "none",
        "scope": "openid email profile",
        "default_scopes": ["openid", "email", "profile"],
        "default_max_age": 3600,
    }))
}

/// Basic server information at the root path
async fn server_info(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
    Json(json!({
        "name": protocol::SERVER_NAME,
        "version": protocol::SERVER_VERSION,
        "description": "OAuth-protected MCP server for Recruitee API",
        "mcp_version": protocol::MCP_PROTOCOL_VERSION,
        "protocol": "mcp",
        "endpoints": {
            "mcp": resources.mcp_path,
            "oauth_metadata": routes::OAUTH_METADATA_PATH,
            "protected_resource_metadata": routes::PROTECTED_RESOURCE_PATH,
            "client_registration": "/register",
            "actions": "/actions",
            "search": "/search",
        },
        "capabilities": {
            "tools": ["search_candidates", "search_candidate_by_query", "get_candidates_details"],
            "resources": ["candidates"],
            "prompts": ["search", "filter"],
        },
        "actions": [
            {
                "name": "search",
                "available": true,
                "description": "Search and filter candidates",
            }
        ],
        "authentication": "OAuth 2.0 (Google)",
        "allowed_domains": resources.config.auth.allowed_domains,
        "openai_compatible": true,
    }))
}

/// Search action description probed by ChatGPT connectors
async fn search_action(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
    Json(json!({
        "action": "search",
        "available": true,
        "description": "Search candidates using various filters",
        "endpoints": [
            {
                "name": "search_candidates",
                "description": "Search candidates with advanced filters",
                "method": "POST",
                "path": resources.mcp_path,
            },
            {
                "name": "search_candidate_by_query",
                "description": "Search candidates by text query",
                "method": "POST",
                "path": resources.mcp_path,
            }
        ],
        "authentication_required": true,
        "oauth_flow": "authorization_code",
    }))
}

/// Action catalog probed by ChatGPT connectors
async fn actions_list(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
    Json(json!({
        "actions": [
            {
                "name": "search",
                "description": "Search and filter candidates",
                "available": true,
                "endpoint": "/action/search",
            },
            {
                "name": "candidate_details",
                "description": "Get detailed candidate information",
                "available": true,
                "endpoint": resources.mcp_path,
            }
        ],
        "authentication": "OAuth 2.0",
        "base_url": resources.config.issuer_url(),
    }))
}
