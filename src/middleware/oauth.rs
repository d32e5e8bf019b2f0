// ABOUTME: Google OAuth middleware validating bearer tokens against the userinfo endpoint
// ABOUTME: Enforces the email domain allowlist and attaches the user to request extensions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::bearer_token;
use crate::config::AuthConfig;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::mcp::resources::ServerResources;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// User identity returned by Google's userinfo endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Empty when the userinfo payload carries no email; the domain
    /// allowlist rejects it downstream
    #[serde(default)]
    pub email: String,
    /// Remaining userinfo claims (name, picture, ...)
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

/// Request extension carrying the validated user
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub GoogleUserInfo);

/// Validates Google access tokens by calling the userinfo endpoint
#[derive(Debug, Clone)]
pub struct GoogleTokenValidator {
    http: reqwest::Client,
    userinfo_url: String,
}

impl GoogleTokenValidator {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(auth: &AuthConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(limits::HTTP_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(limits::HTTP_CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config("failed to build HTTP client").with_source(e))?;
        Ok(Self {
            http,
            userinfo_url: auth.userinfo_url.clone(),
        })
    }

    /// Resolve an access token to a user identity
    ///
    /// # Errors
    ///
    /// Returns an auth error for any non-success userinfo response and an
    /// external-service error for transport failures.
    pub async fn validate(&self, token: &str) -> AppResult<GoogleUserInfo> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::auth_invalid(format!(
                "userinfo endpoint returned {status}"
            )));
        }
        Ok(response.json().await?)
    }
}

/// Require a valid Google access token on the MCP path.
///
/// Failure details stay in the log; clients only see a generic
/// `invalid_token` description.
pub async fn oauth_auth_middleware(
    State(resources): State<Arc<ServerResources>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with(&resources.mcp_path) {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()) else {
        return invalid_token("Missing or invalid authorization header");
    };

    let user = match resources.token_validator.validate(&token).await {
        Ok(user) => user,
        Err(err) => {
            warn!(error = %err, "OAuth token validation failed");
            return invalid_token("Invalid or expired OAuth token");
        }
    };

    let allowed = &resources.config.auth.allowed_domains;
    if !email_domain_allowed(&user.email, allowed) {
        warn!(email = %user.email, "OAuth login from disallowed domain");
        return access_denied(allowed);
    }

    debug!(email = %user.email, "OAuth request authorized");
    request.extensions_mut().insert(AuthenticatedUser(user));
    next.run(request).await
}

fn email_domain_allowed(email: &str, allowed: &[String]) -> bool {
    email
        .split_once('@')
        .map(|(_, domain)| domain.to_ascii_lowercase())
        .is_some_and(|domain| allowed.iter().any(|a| *a == domain))
}

fn invalid_token(description: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_token",
            "error_description": description,
        })),
    )
        .into_response()
}

fn access_denied(allowed: &[String]) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "access_denied",
            "error_description": format!(
                "Email domain not allowed. Allowed domains: {}",
                allowed.join(", ")
            ),
        })),
    )
        .into_response()
}
