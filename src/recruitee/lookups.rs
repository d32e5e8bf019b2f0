// ABOUTME: Lookup catalogs: talent pools, disqualify reasons, and candidate tags
// ABOUTME: Name-to-id catalogs the search tools reference, served from TTL caches
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::RecruiteeApi;
use crate::errors::AppResult;
use serde::Deserialize;
use serde_json::{json, Value};

/// Archive-status filter for talent pool listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolScope {
    #[default]
    NotArchived,
    Archived,
    All,
}

impl PoolScope {
    fn matches(self, pool: &Value) -> bool {
        let archived = pool.get("status").and_then(Value::as_str) == Some("archived");
        match self {
            Self::All => true,
            Self::NotArchived => !archived,
            Self::Archived => archived,
        }
    }
}

fn pool_summary(pool: &Value) -> Value {
    json!({
        "id": pool.get("id"),
        "title": pool.get("title"),
        "status": pool.get("status"),
    })
}

impl RecruiteeApi {
    /// Talent pools (id, title, status), filtered by archive status
    pub async fn list_talent_pools(&self, scope: PoolScope) -> AppResult<Vec<Value>> {
        Ok(self
            .cached_talent_pools()
            .await?
            .iter()
            .filter(|pool| scope.matches(pool))
            .map(pool_summary)
            .collect())
    }

    /// Full details for one talent pool
    pub async fn get_talent_pool_details(&self, talent_pool_id: i64) -> AppResult<Value> {
        let data = self
            .client()
            .get(&format!("/talent_pools/{talent_pool_id}"))
            .await?;
        Ok(data.get("talent_pool").cloned().unwrap_or_else(|| json!({})))
    }

    /// Every configured disqualify reason (id, name)
    pub async fn list_disqualify_reasons(&self) -> AppResult<Vec<Value>> {
        Ok(self
            .cached_disqualify_reasons()
            .await?
            .iter()
            .map(|reason| json!({"id": reason.get("id"), "name": reason.get("name")}))
            .collect())
    }

    /// Every configured candidate tag (id, name, usage count)
    pub async fn list_candidate_tags(&self) -> AppResult<Vec<Value>> {
        Ok(self
            .cached_tags()
            .await?
            .iter()
            .map(|tag| {
                json!({
                    "id": tag.get("id"),
                    "name": tag.get("name"),
                    "count": tag.get("taggings_count"),
                })
            })
            .collect())
    }
}
