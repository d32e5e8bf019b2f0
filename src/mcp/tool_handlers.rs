// ABOUTME: Executes tools/call requests by routing tool names to RecruiteeApi operations
// ABOUTME: Argument parsing errors are invalid-params; execution failures become isError results
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::prompts;
use super::protocol::{McpRequest, McpResponse};
use super::resources::ServerResources;
use super::schema::ToolResponse;
use crate::constants::{jsonrpc_errors, limits};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::recruitee::lookups::PoolScope;
use crate::recruitee::metrics::{
    BreakdownMetricQueryParams, FunnelMetricQueryParams, SingleMetricQueryParams,
    TimeBasedMetricQueryParams, TrendMetricQueryParams,
};
use crate::recruitee::CandidateSearchFilter;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Tool execution entry point shared by every transport
pub struct ToolHandlers;

impl ToolHandlers {
    /// Handle a `tools/call` request
    pub async fn handle_tools_call(request: McpRequest, resources: &ServerResources) -> McpResponse {
        let id = request.id.clone();
        let params = request.params.unwrap_or_else(|| json!({}));

        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return McpResponse::error(
                id,
                jsonrpc_errors::ERROR_INVALID_PARAMS,
                "tools/call requires a 'name' parameter",
            );
        };
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        debug!(tool = name, "executing tool");
        match Self::dispatch(name, &arguments, resources).await {
            Ok(value) => match serde_json::to_value(ToolResponse::success(value)) {
                Ok(result) => McpResponse::success(id, result),
                Err(e) => McpResponse::error(
                    id,
                    jsonrpc_errors::ERROR_INTERNAL,
                    format!("Failed to serialize tool result: {e}"),
                ),
            },
            Err(err) if err.code == ErrorCode::ResourceNotFound => McpResponse::error(
                id,
                jsonrpc_errors::ERROR_INVALID_PARAMS,
                err.message,
            ),
            Err(err) => {
                warn!(tool = name, error = %err, "tool execution failed");
                match serde_json::to_value(ToolResponse::error(err.message)) {
                    Ok(result) => McpResponse::success(id, result),
                    Err(e) => McpResponse::error(
                        id,
                        jsonrpc_errors::ERROR_INTERNAL,
                        format!("Failed to serialize tool error: {e}"),
                    ),
                }
            }
        }
    }

    async fn dispatch(name: &str, args: &Value, resources: &ServerResources) -> AppResult<Value> {
        let api = &resources.recruitee;
        match name {
            "search_candidates" => {
                let filter: CandidateSearchFilter = required(args, "search_filter")?;
                to_value(api.search_candidates(&filter).await?)
            }
            "search_candidate_by_query" => {
                let query: String = required(args, "query")?;
                let search_name = optional_or(args, "search_name", false)?;
                let limit = optional_or(args, "limit", limits::DEFAULT_SEARCH_LIMIT)?;
                let offset = optional_or(args, "offset", 0)?;
                to_value(
                    api.search_candidate_by_query(&query, search_name, limit, offset)
                        .await?,
                )
            }
            "get_candidates_details" => {
                let ids: Vec<i64> = required(args, "candidate_ids")?;
                let fields: Vec<String> = optional_or(args, "fields", Vec::new())?;
                to_value(api.get_candidates_details(&ids, &fields).await?)
            }
            "list_candidate_fields" => to_value(api.list_candidate_fields().await?),
            "get_candidate_notes" => {
                let id: i64 = required(args, "candidate_id")?;
                let limit = optional_or(args, "limit", limits::DEFAULT_SEARCH_LIMIT)?;
                let offset = optional_or(args, "offset", 0)?;
                to_value(api.get_candidate_notes(id, limit, offset).await?)
            }
            "list_offers" => to_value(api.list_offers().await?),
            "get_offers_details" => {
                let ids: Vec<i64> = required(args, "offer_ids")?;
                let fields: Vec<String> = optional_or(args, "fields", Vec::new())?;
                api.get_offers_details(&ids, &fields).await
            }
            "list_offer_fields" => to_value(api.list_offer_fields().await?),
            "get_offer_stages" => {
                let id: i64 = required(args, "offer_id")?;
                to_value(api.get_offer_stages(id).await?)
            }
            "get_offer_notes" => {
                let id: i64 = required(args, "offer_id")?;
                let limit = optional_or(args, "limit", limits::DEFAULT_SEARCH_LIMIT)?;
                let offset = optional_or(args, "offset", 0)?;
                to_value(api.get_offer_notes(id, limit, offset).await?)
            }
            "list_talent_pools" => {
                let scope: PoolScope = optional_or(args, "scope", PoolScope::NotArchived)?;
                to_value(api.list_talent_pools(scope).await?)
            }
            "get_talent_pool_details" => {
                let id: i64 = required(args, "talent_pool_id")?;
                api.get_talent_pool_details(id).await
            }
            "list_disqualify_reasons" => to_value(api.list_disqualify_reasons().await?),
            "list_candidate_tags" => to_value(api.list_candidate_tags().await?),
            "list_metrics" => to_value(api.list_metrics().await?),
            "get_metric_details" => {
                let metrics = metric_names(args)?;
                to_value(api.get_metric_details(&metrics).await?)
            }
            "get_single_metric_data" => {
                let params: SingleMetricQueryParams = required(args, "mqp")?;
                api.get_single_metric_data(&params).await
            }
            "get_trend_metric_data" => {
                let params: TrendMetricQueryParams = required(args, "mqp")?;
                api.get_trend_metric_data(&params).await
            }
            "get_breakdown_metric_data" => {
                let params: BreakdownMetricQueryParams = required(args, "mqp")?;
                api.get_breakdown_metric_data(&params).await
            }
            "get_funnel_metric_data" => {
                let params: FunnelMetricQueryParams = required(args, "mqp")?;
                api.get_funnel_metric_data(&params).await
            }
            "get_time_based_metric_data" => {
                let params: TimeBasedMetricQueryParams = required(args, "mqp")?;
                api.get_time_based_metric_data(&params).await
            }
            "candidate_details_prompt" => Ok(json!(prompts::CANDIDATE_DETAILS_PROMPT)),
            "instructions" => Ok(json!(prompts::INSTRUCTIONS)),
            "recruitment_report_prompt" => Ok(json!(prompts::RECRUITMENT_REPORT_PROMPT)),
            unknown => Err(AppError::not_found(format!("tool '{unknown}'"))),
        }
    }
}

fn to_value<T: serde::Serialize>(value: T) -> AppResult<Value> {
    Ok(serde_json::to_value(value)?)
}

fn required<T: DeserializeOwned>(args: &Value, key: &str) -> AppResult<T> {
    let value = args
        .get(key)
        .cloned()
        .ok_or_else(|| AppError::invalid_input(format!("missing required argument '{key}'")))?;
    serde_json::from_value(value)
        .map_err(|e| AppError::invalid_input(format!("invalid argument '{key}': {e}")))
}

fn optional_or<T: DeserializeOwned>(args: &Value, key: &str, default: T) -> AppResult<T> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| AppError::invalid_input(format!("invalid argument '{key}': {e}"))),
    }
}

/// `metric` accepts either a single name or a list of names
fn metric_names(args: &Value) -> AppResult<Vec<String>> {
    match args.get("metric") {
        Some(Value::String(name)) => Ok(vec![name.clone()]),
        Some(other) => serde_json::from_value(other.clone())
            .map_err(|e| AppError::invalid_input(format!("invalid argument 'metric': {e}"))),
        None => Err(AppError::invalid_input("missing required argument 'metric'")),
    }
}
