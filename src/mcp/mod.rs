// ABOUTME: MCP protocol implementation: JSON-RPC types, tool schemas, dispatch, transports
// ABOUTME: Transports (stdio, SSE, streamable HTTP) all funnel into ProtocolHandler
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

//! Model Context Protocol implementation
//!
//! JSON-RPC 2.0 message types live in [`protocol`], tool schemas and
//! response shapes in [`schema`], and tool execution in [`tool_handlers`].
//! The transports ([`stdio_transport`], [`sse_transport`], and the HTTP
//! handler in [`crate::routes`]) share one dispatcher.

pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod schema;
pub mod sse_transport;
pub mod stdio_transport;
pub mod tool_handlers;

pub use protocol::{McpError, McpRequest, McpResponse, ProtocolHandler};
pub use resources::ServerResources;
