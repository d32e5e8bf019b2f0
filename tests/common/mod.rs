// ABOUTME: Shared helpers for integration tests: canned config and server resources
// ABOUTME: Keeps per-test setup down to overriding the fields under test
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

#![allow(dead_code)]

use recruitee_mcp_server::config::{
    AuthConfig, DocumentsConfig, RecruiteeConfig, ServerConfig,
};
use recruitee_mcp_server::mcp::resources::ServerResources;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration with working defaults; tests override what they exercise
#[must_use]
pub fn test_config(documents_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        recruitee: RecruiteeConfig {
            api_token: "test-api-token".into(),
            company_id: "12345".into(),
        },
        auth: AuthConfig {
            mcp_bearer_token: None,
            oauth_enabled: false,
            google_client_id: Some("client-id.apps.googleusercontent.com".into()),
            google_client_secret: Some("client-secret".into()),
            allowed_domains: vec!["appunite.com".into(), "appunite.pl".into()],
            userinfo_url: "http://127.0.0.1:1/userinfo".into(),
        },
        documents: DocumentsConfig {
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            dir: documents_dir,
        },
        base_deploy_url: Some("https://mcp.example.com".into()),
    }
}

#[must_use]
pub fn test_resources(config: ServerConfig) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(config, "/mcp").expect("failed to build server resources"))
}
