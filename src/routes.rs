// ABOUTME: HTTP router assembly for the streamable-http and SSE transports
// ABOUTME: Wires the MCP endpoint, discovery routes, documents mount, and auth middlewares
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use crate::constants::routes as route_paths;
use crate::mcp::protocol::{McpRequest, McpResponse, ProtocolHandler};
use crate::mcp::resources::ServerResources;
use crate::mcp::sse_transport;
use crate::middleware::bearer::bearer_auth_middleware;
use crate::middleware::login::login_gate_middleware;
use crate::middleware::oauth::oauth_auth_middleware;
use crate::oauth2_server;
use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// `POST {mcp_path}` dispatching one JSON-RPC request per call.
///
/// Notifications get an empty 202, everything else a JSON response body.
async fn handle_mcp_post(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<McpRequest>,
) -> Response {
    match ProtocolHandler::handle_request(request, &resources).await {
        Some(response) => Json::<McpResponse>(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

fn mcp_router(resources: Arc<ServerResources>) -> Router {
    let path = resources.mcp_path.clone();
    Router::new()
        .route(&path, post(handle_mcp_post))
        .with_state(resources)
}

/// Static documents mount; the directory is created when missing
fn documents_router(resources: &ServerResources) -> Option<Router> {
    let dir = &resources.config.documents.dir;
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "documents directory unavailable, mount skipped");
        return None;
    }
    Some(Router::new().nest_service(route_paths::DOCUMENTS_PATH, ServeDir::new(dir)))
}

/// Full router for the streamable-http transport.
///
/// The login gate always covers `/documents`; the bearer middleware is
/// always wired and fail-opens when no token is configured; OAuth is wired
/// only when enabled.
pub fn build_streamable_http_router(resources: Arc<ServerResources>) -> Router {
    let mut router = Router::new()
        .merge(mcp_router(Arc::clone(&resources)))
        .merge(oauth2_server::router(Arc::clone(&resources)));
    if let Some(documents) = documents_router(&resources) {
        router = router.merge(documents);
    }

    // layers run top-down: trace, login gate, bearer, then OAuth
    if resources.config.auth.oauth_enabled {
        router = router.layer(middleware::from_fn_with_state(
            Arc::clone(&resources),
            oauth_auth_middleware,
        ));
    }
    router
        .layer(middleware::from_fn_with_state(
            Arc::clone(&resources),
            bearer_auth_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&resources),
            login_gate_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Router for the SSE transport; no auth layer in this mode
pub fn build_sse_router(resources: Arc<ServerResources>, path: &str) -> Router {
    sse_transport::router(resources, path).layer(TraceLayer::new_for_http())
}

/// Bind and serve a router until the process is stopped
///
/// # Errors
///
/// Returns an error when the address is invalid or the listener fails.
pub async fn serve(router: Router, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");
    axum::serve(listener, router).await?;
    Ok(())
}
