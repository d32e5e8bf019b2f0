// ABOUTME: Thin HTTP client for the company-scoped Recruitee REST API
// ABOUTME: Owns the reqwest client, bearer auth header, timeouts, and error mapping
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use crate::config::RecruiteeConfig;
use crate::constants::{limits, recruitee};
use crate::errors::{AppError, AppResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to one Recruitee company account
#[derive(Debug, Clone)]
pub struct RecruiteeClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecruiteeClient {
    /// Build a client with the account's bearer token and fixed timeouts
    ///
    /// # Errors
    ///
    /// Returns an error when the API token is not a valid header value or
    /// the underlying HTTP client cannot be constructed.
    pub fn new(config: &RecruiteeConfig) -> AppResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|e| AppError::config("RECRUITEE_API_TOKEN is not a valid header value").with_source(e))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(limits::HTTP_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(limits::HTTP_CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config("failed to build HTTP client").with_source(e))?;

        Ok(Self {
            http,
            base_url: format!("{}/{}", recruitee::API_BASE_URL, config.company_id),
        })
    }

    /// GET a path relative to the company base URL
    pub async fn get(&self, path: &str) -> AppResult<Value> {
        self.execute(self.http.get(self.url(path))).await
    }

    /// GET with query parameters
    pub async fn get_query<Q>(&self, path: &str, query: &Q) -> AppResult<Value>
    where
        Q: Serialize + ?Sized,
    {
        self.execute(self.http.get(self.url(path)).query(query)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> AppResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = %status, "Recruitee API response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(256).collect();
            return Err(AppError::external_service(
                "Recruitee",
                format!("HTTP {status}: {snippet}"),
            ));
        }

        Ok(response.json().await?)
    }
}
