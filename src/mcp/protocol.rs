// ABOUTME: JSON-RPC 2.0 message types and core MCP method dispatch
// ABOUTME: Notifications (requests without id) never produce a response
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::resources::ServerResources;
use super::schema::{get_tools, InitializeResponse};
use super::tool_handlers::ToolHandlers;
use crate::constants::{jsonrpc_errors, protocol};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Absent for notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl McpRequest {
    /// A request without an id is a notification and gets no response
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
    pub id: Option<Value>,
}

impl McpResponse {
    #[must_use]
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: protocol::JSONRPC_VERSION.into(),
            result: Some(result),
            error: None,
            id,
        }
    }

    #[must_use]
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: protocol::JSONRPC_VERSION.into(),
            result: None,
            error: Some(McpError::new(code, message)),
            id,
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Core MCP method dispatcher shared by every transport
pub struct ProtocolHandler;

impl ProtocolHandler {
    /// Dispatch one request; `None` means no response should be sent
    /// (notifications).
    pub async fn handle_request(
        request: McpRequest,
        resources: &ServerResources,
    ) -> Option<McpResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "notification received, no response");
            return None;
        }

        let id = request.id.clone();
        if request.jsonrpc != protocol::JSONRPC_VERSION {
            return Some(McpResponse::error(
                id,
                jsonrpc_errors::ERROR_INVALID_REQUEST,
                format!("Unsupported JSON-RPC version: {}", request.jsonrpc),
            ));
        }

        debug!(method = %request.method, "dispatching MCP request");
        let response = match request.method.as_str() {
            "initialize" => Self::handle_initialize(id),
            "ping" => McpResponse::success(id, json!({})),
            "tools/list" => Self::handle_tools_list(id),
            "tools/call" => ToolHandlers::handle_tools_call(request, resources).await,
            "prompts/list" => McpResponse::success(id, json!({"prompts": []})),
            "resources/list" => McpResponse::success(id, json!({"resources": []})),
            method => McpResponse::error(
                id,
                jsonrpc_errors::ERROR_METHOD_NOT_FOUND,
                format!("Method not found: {method}"),
            ),
        };
        Some(response)
    }

    fn handle_initialize(id: Option<Value>) -> McpResponse {
        match serde_json::to_value(InitializeResponse::new()) {
            Ok(result) => McpResponse::success(id, result),
            Err(e) => McpResponse::error(
                id,
                jsonrpc_errors::ERROR_INTERNAL,
                format!("Failed to serialize initialize response: {e}"),
            ),
        }
    }

    fn handle_tools_list(id: Option<Value>) -> McpResponse {
        match serde_json::to_value(get_tools()) {
            Ok(tools) => McpResponse::success(id, json!({"tools": tools})),
            Err(e) => McpResponse::error(
                id,
                jsonrpc_errors::ERROR_INTERNAL,
                format!("Failed to serialize tool list: {e}"),
            ),
        }
    }
}
