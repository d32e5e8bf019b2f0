// ABOUTME: Static bearer token middleware guarding the MCP endpoint
// ABOUTME: Fail-open when no token is configured; otherwise 401 with {"detail":"Unauthorized"}
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::{bearer_token, constant_time_eq};
use crate::mcp::resources::ServerResources;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Require the configured static bearer token on the MCP path.
///
/// Unset `MCP_BEARER_TOKEN` disables the check entirely; requests outside
/// the protected prefix always pass.
pub async fn bearer_auth_middleware(
    State(resources): State<Arc<ServerResources>>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with(&resources.mcp_path) {
        return next.run(request).await;
    }

    let Some(expected) = resources.config.auth.mcp_bearer_token.as_deref() else {
        return next.run(request).await;
    };

    let provided = bearer_token(request.headers());
    let authorized = provided
        .as_deref()
        .is_some_and(|token| constant_time_eq(token.as_bytes(), expected.as_bytes()));

    if authorized {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "rejected request with missing or invalid bearer token");
        unauthorized()
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Unauthorized"}))).into_response()
}
