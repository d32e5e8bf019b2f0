// ABOUTME: Candidate search and detail operations against the Recruitee search API
// ABOUTME: Compiles typed search filters into the filters_json array the API expects
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::{iso_to_unix, RecruiteeApi};
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Combiner applied to the `skills` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillsCombiner {
    #[default]
    In,
    NotIn,
    Contains,
    NotContains,
    HasAllOf,
}

impl SkillsCombiner {
    const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::HasAllOf => "has_all_of",
        }
    }
}

/// Combiner applied to the `talent_pools` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentPoolsCombiner {
    #[default]
    In,
    NotIn,
    AllIn,
}

impl TalentPoolsCombiner {
    const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::AllIn => "all_in",
        }
    }
}

/// Combiner applied to custom-field filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomFieldsCombiner {
    HasAny,
    HasNone,
}

impl CustomFieldsCombiner {
    const fn as_str(self) -> &'static str {
        match self {
            Self::HasAny => "has_any",
            Self::HasNone => "has_none",
        }
    }
}

const fn default_limit() -> u64 {
    limits::DEFAULT_SEARCH_LIMIT
}

/// Multi-field candidate search filter.
///
/// Id-valued fields take values obtained from the lookup tools
/// (`list_offers`, `list_candidate_tags`, `list_talent_pools`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateSearchFilter {
    /// Offer ids the candidate applied to
    pub offer_ids: Option<Vec<i64>>,
    /// Rejection reason names
    pub disqualify_reasons: Option<Vec<String>>,
    pub is_disqualified: Option<bool>,
    pub candidate_tag_ids: Option<Vec<i64>>,
    /// Required skill keywords
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub skills_combiner: SkillsCombiner,
    /// Talent-pool ids
    pub talent_pools: Option<Vec<i64>>,
    #[serde(default)]
    pub talent_pools_combiner: TalentPoolsCombiner,
    pub has_stage: Option<bool>,
    /// Stage names the candidate must currently be on
    pub on_stage: Option<Vec<String>>,
    /// GDPR expiration window, ISO 8601
    pub gdpr_expires_from: Option<String>,
    pub gdpr_expires_to: Option<String>,
    /// Creation date window, ISO 8601
    pub created_from: Option<String>,
    pub created_to: Option<String>,
    /// Custom field `search_key`
    pub custom_fields: Option<String>,
    pub custom_fields_combiner: Option<CustomFieldsCombiner>,
    /// Page size, capped at 10 000
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl CandidateSearchFilter {
    /// Check limits before issuing the request
    pub fn validate(&self) -> AppResult<()> {
        validate_limit(self.limit)
    }

    /// Compile the filter into the `filters_json` array the search API expects
    pub fn build_filters(&self) -> AppResult<Vec<Value>> {
        let mut filters = Vec::new();

        if let Some(ids) = non_empty(&self.offer_ids) {
            filters.push(json!({"filter": "jobs", "id": {"in": ids}}));
        }

        if let Some(reasons) = non_empty(&self.disqualify_reasons) {
            filters.push(json!({"filter": "disqualifies", "reason": {"in": reasons}}));
        }
        if let Some(disqualified) = self.is_disqualified {
            let key = if disqualified { "has_any" } else { "has_none" };
            filters.push(json!({"filter": "disqualifies", "reason": {key: true}}));
        }

        if let Some(ids) = non_empty(&self.candidate_tag_ids) {
            filters.push(json!({"filter": "tags", "id": {"in": ids}}));
        }

        if let Some(skills) = non_empty(&self.skills) {
            let combiner = self.skills_combiner.as_str();
            filters.push(json!({"filter": "skills", "text": {combiner: skills}}));
        }

        if let Some(pools) = non_empty(&self.talent_pools) {
            let combiner = self.talent_pools_combiner.as_str();
            filters.push(json!({"filter": "talent_pools", "id": {combiner: pools}}));
        }

        if let Some(has_stage) = self.has_stage {
            let key = if has_stage { "has_any" } else { "has_none" };
            filters.push(json!({"filter": "stages", key: true}));
        }
        if let Some(stages) = &self.on_stage {
            filters.push(json!({"filter": "stages", "name": {"in": stages}}));
        }

        if let Some(window) =
            date_window("gdpr_expires_at", &self.gdpr_expires_from, &self.gdpr_expires_to)?
        {
            filters.push(window);
        }
        if let Some(window) = date_window("created_at", &self.created_from, &self.created_to)? {
            filters.push(window);
        }

        if let (Some(field), Some(combiner)) = (&self.custom_fields, self.custom_fields_combiner) {
            let combiner = combiner.as_str();
            filters.push(json!({"filter": field, combiner: true}));
        }

        Ok(filters)
    }
}

/// Epoch-second window filter on a date field; `None` when both bounds are unset
fn date_window(field: &str, from: &Option<String>, to: &Option<String>) -> AppResult<Option<Value>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let mut window = Map::new();
    window.insert("field".into(), Value::String(field.into()));
    if let Some(from) = from {
        window.insert("gte".into(), iso_to_unix(from)?.into());
    }
    if let Some(to) = to {
        window.insert("lte".into(), iso_to_unix(to)?.into());
    }
    Ok(Some(Value::Object(window)))
}

fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&Vec<T>> {
    list.as_ref().filter(|v| !v.is_empty())
}

fn validate_limit(limit: u64) -> AppResult<()> {
    if limit > limits::MAX_QUERY_LIMIT {
        return Err(AppError::invalid_input(format!(
            "Recruitee caps limit at {} per call",
            limits::MAX_QUERY_LIMIT
        )));
    }
    Ok(())
}

/// Reduce a search hit to the id/name/emails triple returned by the tools
fn hit_summary(hit: &Value) -> Value {
    json!({
        "id": hit.get("id"),
        "name": hit.get("name"),
        "emails": hit.get("emails"),
    })
}

fn search_hits(data: &Value) -> Vec<Value> {
    data.get("hits")
        .and_then(Value::as_array)
        .map(|hits| hits.iter().map(hit_summary).collect())
        .unwrap_or_default()
}

impl RecruiteeApi {
    /// Search candidates with a multi-field filter
    pub async fn search_candidates(&self, filter: &CandidateSearchFilter) -> AppResult<Vec<Value>> {
        filter.validate()?;
        let filters = filter.build_filters()?;
        let params = [
            ("limit", filter.limit.to_string()),
            ("offset", filter.offset.to_string()),
            ("filters_json", serde_json::to_string(&filters)?),
        ];
        let data = self.client().get_query("/search/new/candidates", &params).await?;
        Ok(search_hits(&data))
    }

    /// Full-text candidate search across name, email, and other fields.
    ///
    /// An empty query returns no results without calling the API. With
    /// `exact_name` the hits are post-filtered to exact name matches.
    pub async fn search_candidate_by_query(
        &self,
        query: &str,
        exact_name: bool,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Value>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        validate_limit(limit)?;

        let filters = json!([{"field": "all", "query": query}]);
        let params = [
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("filters_json", filters.to_string()),
        ];
        let data = self.client().get_query("/search/new/candidates", &params).await?;
        let mut hits = search_hits(&data);
        if exact_name {
            hits.retain(|hit| hit.get("name").and_then(Value::as_str) == Some(query));
        }
        Ok(hits)
    }

    /// Fetch candidates by id with optional field projection.
    ///
    /// Empty `fields` returns the full candidate objects.
    pub async fn get_candidates_details(
        &self,
        candidate_ids: &[i64],
        fields: &[String],
    ) -> AppResult<Vec<Value>> {
        let mut details = Vec::with_capacity(candidate_ids.len());
        for id in candidate_ids {
            let data = self.client().get(&format!("/candidates/{id}")).await?;
            let candidate = data.get("candidate").cloned().unwrap_or_else(|| json!({}));
            details.push(project_fields(&candidate, fields));
        }
        Ok(details)
    }

    /// List the field names of an example candidate
    pub async fn list_candidate_fields(&self) -> AppResult<Vec<String>> {
        let params = [("limit", "1".to_string()), ("offset", "0".to_string())];
        let data = self.client().get_query("/search/new/candidates", &params).await?;
        let Some(example_id) = data
            .get("hits")
            .and_then(Value::as_array)
            .and_then(|hits| hits.first())
            .and_then(|hit| hit.get("id"))
            .and_then(Value::as_i64)
        else {
            return Ok(Vec::new());
        };

        let details = self.get_candidates_details(&[example_id], &[]).await?;
        Ok(details
            .first()
            .and_then(Value::as_object)
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default())
    }

    /// Plain-text notes attached to a candidate profile
    pub async fn get_candidate_notes(
        &self,
        candidate_id: i64,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Value>> {
        let params = [("limit", limit.to_string()), ("offset", offset.to_string())];
        let data = self
            .client()
            .get_query(&format!("/candidates/{candidate_id}/notes"), &params)
            .await?;
        Ok(data
            .get("notes")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

/// Keep only the requested fields; empty selection keeps everything
pub(crate) fn project_fields(object: &Value, fields: &[String]) -> Value {
    if fields.is_empty() {
        return object.clone();
    }
    let mut projected = Map::new();
    if let Some(obj) = object.as_object() {
        for field in fields {
            if let Some(value) = obj.get(field) {
                projected.insert(field.clone(), value.clone());
            }
        }
    }
    Value::Object(projected)
}
