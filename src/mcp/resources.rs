// ABOUTME: Shared server resources injected into handlers and middlewares as Arc state
// ABOUTME: Built once at startup from the validated configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::middleware::oauth::GoogleTokenValidator;
use crate::recruitee::RecruiteeApi;
use std::sync::Arc;

/// Dependency container shared across the server.
///
/// Constructed once in the binary and cloned as `Arc` into every
/// handler and middleware; nothing reads the process environment after
/// this is built.
pub struct ServerResources {
    pub config: Arc<ServerConfig>,
    pub recruitee: RecruiteeApi,
    pub token_validator: GoogleTokenValidator,
    /// Path the MCP endpoint is mounted on for the active transport
    pub mcp_path: String,
}

impl ServerResources {
    /// Build the container from validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error when an HTTP client cannot be constructed.
    pub fn new(config: ServerConfig, mcp_path: impl Into<String>) -> AppResult<Self> {
        let recruitee = RecruiteeApi::new(&config.recruitee)?;
        let token_validator = GoogleTokenValidator::new(&config.auth)?;
        Ok(Self {
            config: Arc::new(config),
            recruitee,
            token_validator,
            mcp_path: mcp_path.into(),
        })
    }
}
