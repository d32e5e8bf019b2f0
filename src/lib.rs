// ABOUTME: Library root for the Recruitee MCP server exposing applicant-tracking data over MCP
// ABOUTME: Wires configuration, the Recruitee API client, auth middlewares, and MCP transports
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

#![deny(unsafe_code)]

//! # Recruitee MCP Server
//!
//! A Model Context Protocol server that exposes a Recruitee company account
//! (candidates, offers, talent pools, recruitment metrics) to LLM clients.
//!
//! ## Features
//!
//! - **MCP Protocol**: JSON-RPC 2.0 over stdio, SSE, or streamable HTTP
//! - **Recruitee Integration**: typed search filters and report queries with
//!   short-lived caching of lookup catalogs
//! - **Authentication**: static bearer token, login/password cookie gate for
//!   the documents mount, and Google OAuth with domain allowlisting
//! - **OAuth Discovery**: RFC 8414 / RFC 8707 metadata plus a static
//!   client registration endpoint

/// Environment-based server configuration
pub mod config;

/// Application-wide constants
pub mod constants;

/// Unified error handling with HTTP status mapping
pub mod errors;

/// Structured logging setup
pub mod logging;

/// MCP protocol implementation (schema, dispatch, transports)
pub mod mcp;

/// HTTP middlewares: bearer, login/password cookie, Google OAuth
pub mod middleware;

/// OAuth discovery and informational endpoints
pub mod oauth2_server;

/// Recruitee API client and tool implementations
pub mod recruitee;

/// HTTP router assembly and server startup
pub mod routes;
