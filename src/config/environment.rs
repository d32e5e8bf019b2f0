// ABOUTME: Environment-based configuration with explicit structs for every subsystem
// ABOUTME: All env access happens once at startup; the rest of the code reads immutable config
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

//! Environment-based configuration management
//!
//! Every environment variable is read exactly once, in
//! [`ServerConfig::from_env`]. Handlers and middlewares receive the parsed,
//! immutable config through shared state and never consult the process
//! environment themselves.

use crate::constants::{auth, network};
use crate::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;

/// Recruitee API access configuration
#[derive(Debug, Clone)]
pub struct RecruiteeConfig {
    /// Personal API token for the company account
    pub api_token: String,
    /// Numeric company identifier
    pub company_id: String,
}

/// Authentication configuration for the HTTP transports
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Static bearer token guarding the MCP endpoint; `None` disables the check
    pub mcp_bearer_token: Option<String>,
    /// Whether the Google OAuth middleware is wired into the router
    pub oauth_enabled: bool,
    /// Google OAuth client id handed out by the registration endpoint
    pub google_client_id: Option<String>,
    /// Google OAuth client secret handed out by the registration endpoint
    pub google_client_secret: Option<String>,
    /// Email domains accepted by the OAuth middleware (lowercase)
    pub allowed_domains: Vec<String>,
    /// Userinfo endpoint used to validate Google access tokens
    pub userinfo_url: String,
}

/// Login/password gate over the static documents mount
#[derive(Debug, Clone)]
pub struct DocumentsConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Directory served under `/documents`; skipped when absent
    pub dir: PathBuf,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub recruitee: RecruiteeConfig,
    pub auth: AuthConfig,
    pub documents: DocumentsConfig,
    /// Public base URL of the deployment, used as OAuth issuer
    pub base_deploy_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file when present. Fails when the Recruitee
    /// credentials are missing so the process exits before binding a socket.
    ///
    /// # Errors
    ///
    /// Returns an error when `RECRUITEE_API_TOKEN` or `RECRUITEE_COMPANY_ID`
    /// is unset or when validation fails.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            recruitee: RecruiteeConfig {
                api_token: require_env("RECRUITEE_API_TOKEN")?,
                company_id: require_env("RECRUITEE_COMPANY_ID")?,
            },
            auth: AuthConfig {
                mcp_bearer_token: optional_env("MCP_BEARER_TOKEN"),
                oauth_enabled: env_flag("OAUTH_ENABLED"),
                google_client_id: optional_env("GOOGLE_CLIENT_ID"),
                google_client_secret: optional_env("GOOGLE_CLIENT_SECRET"),
                allowed_domains: parse_allowed_domains(
                    &env::var("ALLOWED_DOMAINS")
                        .unwrap_or_else(|_| auth::DEFAULT_ALLOWED_DOMAINS.into()),
                ),
                userinfo_url: env::var("GOOGLE_USERINFO_URL")
                    .unwrap_or_else(|_| auth::GOOGLE_USERINFO_URL.into()),
            },
            documents: DocumentsConfig {
                username: optional_env("DOCUMENTS_USERNAME"),
                password: optional_env("DOCUMENTS_PASSWORD"),
                dir: env::var("DOCUMENTS_DIR")
                    .map_or_else(|_| PathBuf::from("documents"), PathBuf::from),
            },
            base_deploy_url: optional_env("BASE_DEPLOY_URL"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error on structurally invalid values.
    pub fn validate(&self) -> AppResult<()> {
        if self.recruitee.company_id.trim().is_empty() {
            return Err(AppError::config("RECRUITEE_COMPANY_ID must not be empty"));
        }
        if self.recruitee.api_token.trim().is_empty() {
            return Err(AppError::config("RECRUITEE_API_TOKEN must not be empty"));
        }
        if let Some(url) = &self.base_deploy_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::config(format!(
                    "BASE_DEPLOY_URL must be an http(s) URL, got: {url}"
                )));
            }
        }
        Ok(())
    }

    /// Issuer URL for the OAuth discovery documents
    #[must_use]
    pub fn issuer_url(&self) -> String {
        self.base_deploy_url
            .clone()
            .unwrap_or_else(|| network::DEFAULT_BASE_URL.into())
    }

    /// Log a configuration summary, never leaking secrets
    pub fn summary(&self) -> String {
        format!(
            "company_id={} bearer_auth={} oauth_enabled={} allowed_domains=[{}] documents_dir={} base_url={}",
            self.recruitee.company_id,
            if self.auth.mcp_bearer_token.is_some() {
                "on"
            } else {
                "off"
            },
            self.auth.oauth_enabled,
            self.auth.allowed_domains.join(","),
            self.documents.dir.display(),
            self.issuer_url(),
        )
    }
}

fn require_env(name: &str) -> AppResult<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::config_missing(name))
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| {
            let v = v.trim().to_ascii_lowercase();
            v == "true" || v == "1" || v == "yes"
        })
        .unwrap_or(false)
}

/// Split a comma-separated domain list, trimming whitespace and dropping
/// empty entries; comparison happens lowercase
fn parse_allowed_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().to_ascii_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serial_test::serial;

    fn test_config() -> ServerConfig {
        ServerConfig {
            recruitee: RecruiteeConfig {
                api_token: "token".into(),
                company_id: "12345".into(),
            },
            auth: AuthConfig {
                mcp_bearer_token: None,
                oauth_enabled: false,
                google_client_id: None,
                google_client_secret: None,
                allowed_domains: vec!["example.com".into()],
                userinfo_url: auth::GOOGLE_USERINFO_URL.into(),
            },
            documents: DocumentsConfig {
                username: None,
                password: None,
                dir: PathBuf::from("documents"),
            },
            base_deploy_url: None,
        }
    }

    #[test]
    fn test_parse_allowed_domains() {
        let domains = parse_allowed_domains("appunite.com, Example.ORG ,,  ");
        assert_eq!(domains, vec!["appunite.com", "example.org"]);
    }

    #[test]
    fn test_parse_allowed_domains_default() {
        let domains = parse_allowed_domains(auth::DEFAULT_ALLOWED_DOMAINS);
        assert_eq!(domains, vec!["appunite.com", "appunite.pl", "appunite.net"]);
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = test_config();
        config.base_deploy_url = Some("ftp://example.com".into());
        assert!(config.validate().is_err());

        config.base_deploy_url = Some("https://mcp.example.com".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_issuer_url_fallback() {
        let mut config = test_config();
        assert_eq!(config.issuer_url(), network::DEFAULT_BASE_URL);
        config.base_deploy_url = Some("https://mcp.example.com".into());
        assert_eq!(config.issuer_url(), "https://mcp.example.com");
    }

    #[test]
    fn test_summary_does_not_leak_secrets() {
        let mut config = test_config();
        config.auth.mcp_bearer_token = Some("super-secret".into());
        let summary = config.summary();
        assert!(!summary.contains("super-secret"));
        assert!(!summary.contains("token"));
        assert!(summary.contains("bearer_auth=on"));
    }

    #[test]
    #[serial]
    fn test_from_env_requires_recruitee_credentials() {
        env::remove_var("RECRUITEE_API_TOKEN");
        env::remove_var("RECRUITEE_COMPANY_ID");
        let err = ServerConfig::from_env().unwrap_err();
        assert!(err.message.contains("RECRUITEE_API_TOKEN"));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_optional_settings() {
        env::set_var("RECRUITEE_API_TOKEN", "t");
        env::set_var("RECRUITEE_COMPANY_ID", "99");
        env::set_var("OAUTH_ENABLED", "true");
        env::set_var("ALLOWED_DOMAINS", "a.com,b.com");
        let config = ServerConfig::from_env().unwrap();
        assert!(config.auth.oauth_enabled);
        assert_eq!(config.auth.allowed_domains, vec!["a.com", "b.com"]);
        env::remove_var("RECRUITEE_API_TOKEN");
        env::remove_var("RECRUITEE_COMPANY_ID");
        env::remove_var("OAUTH_ENABLED");
        env::remove_var("ALLOWED_DOMAINS");
    }
}
