// ABOUTME: Centralized constants for protocol versions, limits, auth defaults, and route paths
// ABOUTME: Single source of truth so magic values never spread across modules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

//! Application-wide constants

/// MCP protocol identifiers
pub mod protocol {
    /// JSON-RPC protocol version
    pub const JSONRPC_VERSION: &str = "2.0";

    /// MCP protocol version implemented by this server
    pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

    /// Server name reported in `initialize` and on the info endpoints
    pub const SERVER_NAME: &str = "Recruitee MCP Server";

    /// Server version from the crate manifest
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// One-line server description for `initialize`
    pub const SERVER_INSTRUCTIONS: &str = "A server for Recruitee API";
}

/// JSON-RPC error codes
pub mod jsonrpc_errors {
    pub const ERROR_PARSE: i32 = -32700;
    pub const ERROR_INVALID_REQUEST: i32 = -32600;
    pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;
    pub const ERROR_INVALID_PARAMS: i32 = -32602;
    pub const ERROR_INTERNAL: i32 = -32603;
}

/// Limits and timing
pub mod limits {
    /// Hard cap on `limit` accepted by search and report tools
    pub const MAX_QUERY_LIMIT: u64 = 10_000;

    /// Default page size for candidate searches
    pub const DEFAULT_SEARCH_LIMIT: u64 = 100;

    /// TTL for cached lookup catalogs (offers, pools, tags, metrics)
    pub const LOOKUP_CACHE_TTL_SECS: u64 = 900;

    /// Total timeout for a Recruitee API request
    pub const HTTP_TIMEOUT_SECS: u64 = 10;

    /// Connect timeout for the Recruitee API client
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;

    /// Maximum accepted login form body
    pub const MAX_FORM_BODY_BYTES: usize = 64 * 1024;
}

/// Authentication defaults
pub mod auth {
    /// Name of the session cookie set after a successful form login
    pub const AUTH_COOKIE_NAME: &str = "auth_token";

    /// The only value the session cookie may carry
    pub const AUTH_COOKIE_VALUE: &str = "authenticated";

    /// Session cookie lifetime: seven days
    pub const AUTH_COOKIE_MAX_AGE_SECS: u64 = 7 * 24 * 3600;

    /// Domains allowed through the OAuth middleware when `ALLOWED_DOMAINS` is unset
    pub const DEFAULT_ALLOWED_DOMAINS: &str = "appunite.com,appunite.pl,appunite.net";

    /// Google OAuth 2.0 authorization endpoint
    pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

    /// Google OAuth 2.0 token endpoint
    pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

    /// Google userinfo endpoint used to validate bearer tokens
    pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

    /// Redirect URIs handed out by the static client registration endpoint
    pub const CLIENT_REDIRECT_URIS: [&str; 6] = [
        "http://localhost:3000/callback",
        "http://localhost:8080/callback",
        "http://127.0.0.1:3000/callback",
        "http://127.0.0.1:8080/callback",
        "https://chatgpt.com/connector_platform_oauth_redirect",
        "https://claude.ai/api/mcp/auth_callback",
    ];
}

/// Route paths
pub mod routes {
    /// Prefix protected by the login/password middleware and serving static files
    pub const DOCUMENTS_PATH: &str = "/documents";

    /// Default MCP endpoint for the streamable HTTP transport
    pub const DEFAULT_MCP_PATH: &str = "/mcp";

    /// Default SSE endpoint
    pub const DEFAULT_SSE_PATH: &str = "/sse";

    /// RFC 8414 authorization server metadata
    pub const OAUTH_METADATA_PATH: &str = "/.well-known/oauth-authorization-server";

    /// RFC 8707 protected resource metadata
    pub const PROTECTED_RESOURCE_PATH: &str = "/.well-known/oauth-protected-resource";
}

/// Recruitee API defaults
pub mod recruitee {
    /// Company-scoped API base; the company id is appended per account
    pub const API_BASE_URL: &str = "https://api.recruitee.com/c";
}

/// Network defaults
pub mod network {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8000;
    /// Issuer fallback when `BASE_DEPLOY_URL` is unset
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
}
