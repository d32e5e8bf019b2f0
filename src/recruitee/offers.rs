// ABOUTME: Job offer operations: listing, detail projection, pipeline stages, and notes
// ABOUTME: The offer catalog is served from the shared TTL cache
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::RecruiteeApi;
use crate::errors::AppResult;
use serde_json::{json, Map, Value};

/// Reduce an offer to the fields returned by `list_offers`
fn offer_summary(offer: &Value) -> Value {
    json!({
        "id": offer.get("id"),
        "title": offer.get("title"),
        "status": offer.get("status"),
        "priority": offer.get("priority"),
    })
}

/// Reduce a pipeline stage to id/name/category/group
fn stage_summary(stage: &Value) -> Value {
    json!({
        "id": stage.get("id"),
        "name": stage.get("name"),
        "category": stage.get("category"),
        "group": stage.get("group"),
    })
}

impl RecruiteeApi {
    /// All job offers with id, title, status, and priority
    pub async fn list_offers(&self) -> AppResult<Vec<Value>> {
        Ok(self.cached_offers().await?.iter().map(offer_summary).collect())
    }

    /// Offer details keyed by id, with optional field projection.
    ///
    /// Empty `fields` returns the full offer objects; requested fields that
    /// an offer lacks come back as `"Field doesn't exist"`.
    pub async fn get_offers_details(
        &self,
        offer_ids: &[i64],
        fields: &[String],
    ) -> AppResult<Value> {
        let mut details = Map::new();
        for id in offer_ids {
            let data = self.client().get(&format!("/offers/{id}")).await?;
            let offer = data.get("offer").cloned().unwrap_or_else(|| json!({}));
            let projected = if fields.is_empty() {
                offer
            } else {
                let mut selected = Map::new();
                for field in fields {
                    let value = offer
                        .get(field)
                        .cloned()
                        .unwrap_or_else(|| Value::String("Field doesn't exist".into()));
                    selected.insert(field.clone(), value);
                }
                Value::Object(selected)
            };
            details.insert(id.to_string(), projected);
        }
        Ok(Value::Object(details))
    }

    /// Field names available on offers, taken from the cached catalog
    pub async fn list_offer_fields(&self) -> AppResult<Vec<String>> {
        Ok(self
            .cached_offers()
            .await?
            .first()
            .and_then(Value::as_object)
            .map(|offer| offer.keys().cloned().collect())
            .unwrap_or_default())
    }

    /// Pipeline stages of an offer (id, name, category, group)
    pub async fn get_offer_stages(&self, offer_id: i64) -> AppResult<Vec<Value>> {
        let data = self.client().get(&format!("/offers/{offer_id}")).await?;
        Ok(data
            .pointer("/offer/pipeline_template/stages")
            .and_then(Value::as_array)
            .map(|stages| stages.iter().map(stage_summary).collect())
            .unwrap_or_default())
    }

    /// Notes attached to an offer
    pub async fn get_offer_notes(
        &self,
        offer_id: i64,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Value>> {
        let params = [("limit", limit.to_string()), ("offset", offset.to_string())];
        let data = self
            .client()
            .get_query(&format!("/offers/{offer_id}/notes"), &params)
            .await?;
        Ok(data
            .get("notes")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}
