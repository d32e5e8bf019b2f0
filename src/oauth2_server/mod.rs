// ABOUTME: OAuth 2.0 discovery surface and informational endpoints for MCP clients
// ABOUTME: Serves RFC 8414 / RFC 8707 metadata and a static client registration endpoint
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

//! OAuth discovery endpoints
//!
//! Authorization happens directly against Google; this server only
//! publishes the metadata MCP clients (Claude Desktop, ChatGPT, ...) probe
//! for, plus a registration endpoint that hands out the preconfigured
//! Google client credentials.

pub mod routes;

pub use routes::router;
