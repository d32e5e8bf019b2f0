// ABOUTME: Recruitee API integration: client, lookup caches, and tool-level operations
// ABOUTME: RecruiteeApi is the single entry point the MCP tool dispatcher calls into
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

//! Recruitee API integration
//!
//! [`RecruiteeApi`] wraps the HTTP client with per-catalog TTL caches.
//! Tool-level operations are implemented in the submodules
//! ([`candidates`], [`offers`], [`lookups`], [`metrics`]) as methods on
//! `RecruiteeApi` so every caller goes through the same caching layer.

pub mod cache;
pub mod candidates;
pub mod client;
pub mod lookups;
pub mod metrics;
pub mod offers;

pub use candidates::CandidateSearchFilter;
pub use client::RecruiteeClient;

use crate::config::RecruiteeConfig;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use cache::TtlCache;
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::time::Duration;

/// Recruitee API facade with cached lookup catalogs
#[derive(Debug)]
pub struct RecruiteeApi {
    client: RecruiteeClient,
    offers: TtlCache<Vec<Value>>,
    talent_pools: TtlCache<Vec<Value>>,
    disqualify_reasons: TtlCache<Vec<Value>>,
    tags: TtlCache<Vec<Value>>,
    metrics: TtlCache<Vec<Value>>,
}

impl RecruiteeApi {
    /// Build the facade for one company account
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: &RecruiteeConfig) -> AppResult<Self> {
        let ttl = Duration::from_secs(limits::LOOKUP_CACHE_TTL_SECS);
        Ok(Self {
            client: RecruiteeClient::new(config)?,
            offers: TtlCache::new(ttl),
            talent_pools: TtlCache::new(ttl),
            disqualify_reasons: TtlCache::new(ttl),
            tags: TtlCache::new(ttl),
            metrics: TtlCache::new(ttl),
        })
    }

    pub(crate) fn client(&self) -> &RecruiteeClient {
        &self.client
    }

    /// Fetch a list endpoint through its cache; `key` names the array in
    /// the response envelope (e.g. `offers` in `{"offers": [...]}`)
    pub(crate) async fn cached_catalog(
        &self,
        cache: &TtlCache<Vec<Value>>,
        path: &str,
        key: &str,
    ) -> AppResult<Vec<Value>> {
        if let Some(items) = cache.get().await {
            return Ok(items);
        }
        let data = self.client.get(path).await?;
        let items = data
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        cache.put(items.clone()).await;
        Ok(items)
    }

    pub(crate) async fn cached_offers(&self) -> AppResult<Vec<Value>> {
        self.cached_catalog(&self.offers, "/offers", "offers").await
    }

    pub(crate) async fn cached_talent_pools(&self) -> AppResult<Vec<Value>> {
        self.cached_catalog(&self.talent_pools, "/talent_pools", "talent_pools")
            .await
    }

    pub(crate) async fn cached_disqualify_reasons(&self) -> AppResult<Vec<Value>> {
        self.cached_catalog(
            &self.disqualify_reasons,
            "/disqualify_reasons",
            "disqualify_reasons",
        )
        .await
    }

    pub(crate) async fn cached_tags(&self) -> AppResult<Vec<Value>> {
        self.cached_catalog(&self.tags, "/tags", "tags").await
    }

    pub(crate) async fn cached_metrics(&self) -> AppResult<Vec<Value>> {
        self.cached_catalog(&self.metrics, "/report/metrics", "metrics")
            .await
    }
}

/// Convert an ISO 8601 timestamp (or bare date) to epoch seconds.
///
/// Accepts `2025-05-20T12:30:00Z`, `2025-05-20T12:30:00+00:00`, and
/// `2025-05-20` (midnight UTC).
///
/// # Errors
///
/// Returns an input error for anything else.
pub fn iso_to_unix(iso: &str) -> AppResult<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Ok(dt.timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc().timestamp());
        }
    }
    Err(AppError::invalid_input(format!(
        "invalid ISO 8601 timestamp: {iso}"
    )))
}
