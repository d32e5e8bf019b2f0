// ABOUTME: MCP tool catalog, initialize payload, and tool response shapes
// ABOUTME: Input schemas mirror the typed parameter structs in the recruitee module
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use crate::constants::protocol;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A tool as reported by `tools/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolSchema {
    fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Content block inside a tool response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

/// Result payload of a `tools/call`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<Content>,
    #[serde(rename = "isError")]
    pub is_error: bool,
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

impl ToolResponse {
    /// Wrap a tool result as a text block plus structured content
    #[must_use]
    pub fn success(value: Value) -> Self {
        let text = match &value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Self {
            content: vec![Content::Text { text }],
            is_error: false,
            structured_content: Some(value),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text {
                text: message.into(),
            }],
            is_error: true,
            structured_content: None,
        }
    }
}

/// `initialize` result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub tools: Value,
    pub prompts: Value,
    pub resources: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl InitializeResponse {
    #[must_use]
    pub fn new() -> Self {
        Self {
            protocol_version: protocol::MCP_PROTOCOL_VERSION.into(),
            capabilities: ServerCapabilities {
                tools: json!({}),
                prompts: json!({}),
                resources: json!({}),
            },
            server_info: ServerInfo {
                name: protocol::SERVER_NAME.into(),
                version: protocol::SERVER_VERSION.into(),
            },
            instructions: protocol::SERVER_INSTRUCTIONS.into(),
        }
    }
}

impl Default for InitializeResponse {
    fn default() -> Self {
        Self::new()
    }
}

fn paging_properties() -> Value {
    json!({
        "limit": {"type": "integer", "description": "Page size (max 10 000)", "default": 100},
        "offset": {"type": "integer", "description": "Paging offset", "default": 0}
    })
}

fn metric_base_properties() -> Value {
    json!({
        "metric": {"type": "string", "description": "Metric type, from list_metrics"},
        "filters": {"type": "string", "description": "Filters in type:value;type:value format (e.g. job:5;department:10)"},
        "primary_group": {"type": "string", "description": "Attribute used to aggregate results"},
        "sort_by": {"type": "string", "description": "Sort field, for sortable metrics"},
        "sort_order": {"type": "string", "enum": ["asc", "desc"]},
        "date_range": {"type": "string", "enum": [
            "range", "today", "yesterday", "this_week", "last_week", "this_month",
            "last_month", "this_quarter", "last_quarter", "this_year", "last_year",
            "last_7_days", "last_14_days", "last_30_days", "last_60_days",
            "last_90_days", "last_365_days", "all_time"
        ]},
        "date_start": {"type": "string", "description": "Start date when date_range=range, YYYY-MM-DD"},
        "date_end": {"type": "string", "description": "End date when date_range=range, YYYY-MM-DD"},
        "page": {"type": "integer", "description": "Page number, used with limit"},
        "limit": {"type": "integer", "description": "Result limit (max 10 000), defaults to 30"}
    })
}

fn metric_tool_schema(extra_properties: Value) -> Value {
    let mut properties = metric_base_properties();
    if let (Some(base), Some(extra)) = (properties.as_object_mut(), extra_properties.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    json!({
        "type": "object",
        "properties": {
            "mqp": {
                "type": "object",
                "properties": properties,
                "required": ["metric"]
            }
        },
        "required": ["mqp"]
    })
}

fn empty_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

/// Complete tool catalog reported by `tools/list`
#[must_use]
pub fn get_tools() -> Vec<ToolSchema> {
    let date_field = json!({
        "date_field": {"type": "string", "description": "Field used for date calculations"},
        "date_resource": {"type": "string", "description": "Resource used for filtering by date"}
    });

    vec![
        ToolSchema::new(
            "search_candidates",
            "Return basic data for candidates who match a multi-field filter. \
             Helper tools convert human-readable names to ids using cached look-ups.",
            json!({
                "type": "object",
                "properties": {
                    "search_filter": {
                        "type": "object",
                        "properties": {
                            "offer_ids": {"type": "array", "items": {"type": "integer"}, "description": "Offer ids from list_offers"},
                            "disqualify_reasons": {"type": "array", "items": {"type": "string"}, "description": "Rejection reason names from list_disqualify_reasons"},
                            "is_disqualified": {"type": "boolean"},
                            "candidate_tag_ids": {"type": "array", "items": {"type": "integer"}, "description": "Tag ids from list_candidate_tags"},
                            "skills": {"type": "array", "items": {"type": "string"}, "description": "Required skill keywords"},
                            "skills_combiner": {"type": "string", "enum": ["in", "not_in", "contains", "not_contains", "has_all_of"], "default": "in"},
                            "talent_pools": {"type": "array", "items": {"type": "integer"}, "description": "Talent-pool ids from list_talent_pools"},
                            "talent_pools_combiner": {"type": "string", "enum": ["in", "not_in", "all_in"], "default": "in"},
                            "has_stage": {"type": "boolean"},
                            "on_stage": {"type": "array", "items": {"type": "string"}, "description": "Stage names from get_offer_stages"},
                            "gdpr_expires_from": {"type": "string", "description": "Earliest GDPR expiration date, ISO 8601"},
                            "gdpr_expires_to": {"type": "string", "description": "Latest GDPR expiration date, ISO 8601"},
                            "created_from": {"type": "string", "description": "Earliest creation date, ISO 8601"},
                            "created_to": {"type": "string", "description": "Latest creation date, ISO 8601"},
                            "custom_fields": {"type": "string", "description": "Custom field search_key"},
                            "custom_fields_combiner": {"type": "string", "enum": ["has_any", "has_none"]},
                            "limit": {"type": "integer", "default": 100},
                            "offset": {"type": "integer", "default": 0}
                        }
                    }
                },
                "required": ["search_filter"]
            }),
        ),
        ToolSchema::new(
            "search_candidate_by_query",
            "Search candidates using a full-text query across name, email, and other fields. \
             With search_name=true only candidates whose name exactly matches the query are returned.",
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string"},
                    "search_name": {"type": "boolean", "default": false},
                    "limit": {"type": "integer", "default": 100},
                    "offset": {"type": "integer", "default": 0}
                },
                "required": ["query"]
            }),
        ),
        ToolSchema::new(
            "get_candidates_details",
            "Return specific fields or full available candidate data by ids. \
             Empty fields returns everything; see list_candidate_fields.",
            json!({
                "type": "object",
                "properties": {
                    "candidate_ids": {"type": "array", "items": {"type": "integer"}},
                    "fields": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["candidate_ids", "fields"]
            }),
        ),
        ToolSchema::new(
            "list_candidate_fields",
            "List all candidate fields that can be requested in get_candidates_details.",
            empty_schema(),
        ),
        ToolSchema::new(
            "get_candidate_notes",
            "Fetch plain-text notes attached to a candidate profile.",
            json!({
                "type": "object",
                "properties": {
                    "candidate_id": {"type": "integer"},
                    "limit": {"type": "integer", "default": 100},
                    "offset": {"type": "integer", "default": 0}
                },
                "required": ["candidate_id"]
            }),
        ),
        ToolSchema::new(
            "list_offers",
            "Return all job offers (id, title, status, priority).",
            empty_schema(),
        ),
        ToolSchema::new(
            "get_offers_details",
            "Return specific fields or full available offer data by ids, keyed by offer id. \
             Empty fields returns everything; see list_offer_fields.",
            json!({
                "type": "object",
                "properties": {
                    "offer_ids": {"type": "array", "items": {"type": "integer"}},
                    "fields": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["offer_ids", "fields"]
            }),
        ),
        ToolSchema::new(
            "list_offer_fields",
            "List all offer fields that can be requested in get_offers_details.",
            empty_schema(),
        ),
        ToolSchema::new(
            "get_offer_stages",
            "Return all pipeline stages for the given offer (id, name, category, group).",
            json!({
                "type": "object",
                "properties": {"offer_id": {"type": "integer"}},
                "required": ["offer_id"]
            }),
        ),
        ToolSchema::new(
            "get_offer_notes",
            "Fetch notes attached to a job offer.",
            json!({
                "type": "object",
                "properties": {
                    "offer_id": {"type": "integer"},
                    "limit": {"type": "integer", "default": 100},
                    "offset": {"type": "integer", "default": 0}
                },
                "required": ["offer_id"]
            }),
        ),
        ToolSchema::new(
            "list_talent_pools",
            "Return all talent pools (id, title, status) with an optional archive-status filter.",
            json!({
                "type": "object",
                "properties": {
                    "scope": {
                        "type": "string",
                        "enum": ["not_archived", "archived", "all"],
                        "default": "not_archived"
                    }
                }
            }),
        ),
        ToolSchema::new(
            "get_talent_pool_details",
            "Return full details for a specific talent pool by id.",
            json!({
                "type": "object",
                "properties": {"talent_pool_id": {"type": "integer"}},
                "required": ["talent_pool_id"]
            }),
        ),
        ToolSchema::new(
            "list_disqualify_reasons",
            "Return every configured disqualify reason (id, name).",
            empty_schema(),
        ),
        ToolSchema::new(
            "list_candidate_tags",
            "Return every configured candidate tag (id, name, count).",
            empty_schema(),
        ),
        ToolSchema::new(
            "list_metrics",
            "Return available recruitment metrics and statistics. \
             Use get_metric_details to fetch specific metric data.",
            empty_schema(),
        ),
        ToolSchema::new(
            "get_metric_details",
            "Fetch detailed data for specific metrics, including available filters and groups.",
            json!({
                "type": "object",
                "properties": {
                    "metric": {
                        "description": "Metric name or list of metric names from list_metrics",
                        "anyOf": [
                            {"type": "string"},
                            {"type": "array", "items": {"type": "string"}}
                        ]
                    }
                },
                "required": ["metric"]
            }),
        ),
        ToolSchema::new(
            "get_single_metric_data",
            "Fetch data for a single metric, e.g. fill_rate. Must match the metric kind.",
            metric_tool_schema(json!({
                "date_field": date_field["date_field"],
                "date_resource": date_field["date_resource"],
                "include_archived_jobs": {"type": "boolean"},
                "include_deleted_candidates": {"type": "boolean"}
            })),
        ),
        ToolSchema::new(
            "get_trend_metric_data",
            "Fetch trend data for a metric, e.g. disqualifications_over_time. Must match the metric kind.",
            metric_tool_schema(json!({
                "date_field": date_field["date_field"],
                "date_resource": date_field["date_resource"],
                "interval": {"type": "string", "enum": ["daily", "weekly", "monthly", "quarterly"], "default": "monthly"},
                "include_archived_jobs": {"type": "boolean"},
                "include_deleted_candidates": {"type": "boolean"}
            })),
        ),
        ToolSchema::new(
            "get_breakdown_metric_data",
            "Fetch breakdown data for a metric, e.g. jobs. Must match the metric kind.",
            metric_tool_schema(json!({
                "date_field": date_field["date_field"],
                "date_resource": date_field["date_resource"],
                "secondary_group": {"type": "string", "description": "Secondary grouping attribute"},
                "include_archived_jobs": {"type": "boolean", "default": true},
                "include_archived_requisitions": {"type": "boolean"},
                "include_deleted_candidates": {"type": "boolean"},
                "show_all_data": {"type": "boolean", "description": "Disable filtering by date"}
            })),
        ),
        ToolSchema::new(
            "get_funnel_metric_data",
            "Fetch funnel data for a metric, e.g. dropoff_rate. Must match the metric kind.",
            metric_tool_schema(json!({
                "date_field": date_field["date_field"],
                "date_resource": date_field["date_resource"]
            })),
        ),
        ToolSchema::new(
            "get_time_based_metric_data",
            "Fetch data for the custom_time_based metric.",
            metric_tool_schema(json!({
                "start_point": {"type": "string", "enum": [
                    "candidate_applied", "candidate_hired", "job_created", "job_published",
                    "requisition_approved", "requisition_created", "requisition_sent_for_approval"
                ]},
                "end_point": {"type": "string", "enum": [
                    "candidate_disqualified", "candidate_hired", "candidate_start_date",
                    "job_closed", "job_created", "job_filled", "job_published",
                    "requisition_approved", "requisition_filled", "requisition_sent_for_approval"
                ]},
                "include_archived_jobs": {"type": "boolean"},
                "include_archived_requisitions": {"type": "boolean"},
                "include_deleted_candidates": {"type": "boolean"}
            })),
        ),
        ToolSchema::new(
            "candidate_details_prompt",
            "Return the prompt used to format candidate details.",
            empty_schema(),
        ),
        ToolSchema::new(
            "instructions",
            "Return the general guidelines for the whole Recruitee MCP server. \
             Should be loaded before using any other tools.",
            empty_schema(),
        ),
        ToolSchema::new(
            "recruitment_report_prompt",
            "Return the prompt with instructions and a template for a recruitment report.",
            empty_schema(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_tool_names_are_unique() {
        let tools = get_tools();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_catalog_covers_every_tool_family() {
        let tools = get_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        for expected in [
            "search_candidates",
            "search_candidate_by_query",
            "get_candidates_details",
            "list_candidate_fields",
            "get_candidate_notes",
            "list_offers",
            "get_offers_details",
            "list_offer_fields",
            "get_offer_stages",
            "get_offer_notes",
            "list_talent_pools",
            "get_talent_pool_details",
            "list_disqualify_reasons",
            "list_candidate_tags",
            "list_metrics",
            "get_metric_details",
            "get_single_metric_data",
            "get_trend_metric_data",
            "get_breakdown_metric_data",
            "get_funnel_metric_data",
            "get_time_based_metric_data",
            "candidate_details_prompt",
            "instructions",
            "recruitment_report_prompt",
        ] {
            assert!(names.contains(&expected), "missing tool: {expected}");
        }
    }

    #[test]
    fn test_schemas_serialize_with_camel_case_keys() {
        let tool = &get_tools()[0];
        let serialized = serde_json::to_value(tool).unwrap();
        assert!(serialized.get("inputSchema").is_some());
        assert_eq!(serialized["inputSchema"]["type"], "object");
    }

    #[test]
    fn test_tool_response_success_wraps_value() {
        let response = ToolResponse::success(json!({"id": 1}));
        assert!(!response.is_error);
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["content"][0]["type"], "text");
        assert_eq!(serialized["structuredContent"]["id"], 1);
    }

    #[test]
    fn test_tool_response_success_keeps_plain_strings() {
        let response = ToolResponse::success(json!("prompt text"));
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["content"][0]["text"], "prompt text");
    }

    #[test]
    fn test_tool_response_error() {
        let response = ToolResponse::error("boom");
        assert!(response.is_error);
        let serialized = serde_json::to_value(&response).unwrap();
        assert!(serialized.get("structuredContent").is_none());
        assert_eq!(serialized["isError"], true);
    }

    #[test]
    fn test_initialize_response_reports_server_identity() {
        let init = InitializeResponse::new();
        assert_eq!(init.protocol_version, "2024-11-05");
        assert_eq!(init.server_info.name, "Recruitee MCP Server");
        let serialized = serde_json::to_value(&init).unwrap();
        assert!(serialized.get("protocolVersion").is_some());
        assert!(serialized.get("serverInfo").is_some());
    }
}
