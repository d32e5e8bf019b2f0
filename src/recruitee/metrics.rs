// ABOUTME: Recruitment report metrics: catalog listing and the five report query endpoints
// ABOUTME: Typed query parameter structs compile to query strings omitting unset fields
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::RecruiteeApi;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Date filter ranges accepted by the report endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    Range,
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisQuarter,
    LastQuarter,
    ThisYear,
    LastYear,
    // digits need explicit spellings, snake_case would drop the underscore
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "last_14_days")]
    Last14Days,
    #[serde(rename = "last_30_days")]
    Last30Days,
    #[serde(rename = "last_60_days")]
    Last60Days,
    #[serde(rename = "last_90_days")]
    Last90Days,
    #[serde(rename = "last_365_days")]
    Last365Days,
    AllTime,
}

impl DateRange {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "this_week",
            Self::LastWeek => "last_week",
            Self::ThisMonth => "this_month",
            Self::LastMonth => "last_month",
            Self::ThisQuarter => "this_quarter",
            Self::LastQuarter => "last_quarter",
            Self::ThisYear => "this_year",
            Self::LastYear => "last_year",
            Self::Last7Days => "last_7_days",
            Self::Last14Days => "last_14_days",
            Self::Last30Days => "last_30_days",
            Self::Last60Days => "last_60_days",
            Self::Last90Days => "last_90_days",
            Self::Last365Days => "last_365_days",
            Self::AllTime => "all_time",
        }
    }
}

/// Grouping interval for trend reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
}

impl Interval {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
        }
    }
}

/// Start events for time-based reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPoint {
    CandidateApplied,
    CandidateHired,
    JobCreated,
    JobPublished,
    RequisitionApproved,
    RequisitionCreated,
    RequisitionSentForApproval,
}

impl StartPoint {
    const fn as_str(self) -> &'static str {
        match self {
            Self::CandidateApplied => "candidate_applied",
            Self::CandidateHired => "candidate_hired",
            Self::JobCreated => "job_created",
            Self::JobPublished => "job_published",
            Self::RequisitionApproved => "requisition_approved",
            Self::RequisitionCreated => "requisition_created",
            Self::RequisitionSentForApproval => "requisition_sent_for_approval",
        }
    }
}

/// End events for time-based reports; valid combinations depend on the start point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndPoint {
    CandidateDisqualified,
    CandidateHired,
    CandidateStartDate,
    JobClosed,
    JobCreated,
    JobFilled,
    JobPublished,
    RequisitionApproved,
    RequisitionFilled,
    RequisitionSentForApproval,
}

impl EndPoint {
    const fn as_str(self) -> &'static str {
        match self {
            Self::CandidateDisqualified => "candidate_disqualified",
            Self::CandidateHired => "candidate_hired",
            Self::CandidateStartDate => "candidate_start_date",
            Self::JobClosed => "job_closed",
            Self::JobCreated => "job_created",
            Self::JobFilled => "job_filled",
            Self::JobPublished => "job_published",
            Self::RequisitionApproved => "requisition_approved",
            Self::RequisitionFilled => "requisition_filled",
            Self::RequisitionSentForApproval => "requisition_sent_for_approval",
        }
    }
}

/// Query parameters shared by every report endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricQueryParams {
    /// Metric type, from `list_metrics`
    pub metric: String,
    /// Filters in `type:value;type:value` format (e.g. `job:5;department:10`)
    pub filters: Option<String>,
    /// Attribute used to aggregate results
    pub primary_group: Option<String>,
    /// Sort field; only sortable metrics accept it
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub date_range: Option<DateRange>,
    /// Start date when `date_range` is `range`, `YYYY-MM-DD`
    pub date_start: Option<String>,
    /// End date when `date_range` is `range`, `YYYY-MM-DD`
    pub date_end: Option<String>,
    /// Page number, only meaningful together with `limit`
    pub page: Option<u64>,
    /// Result limit, capped at 10 000
    pub limit: Option<u64>,
}

impl MetricQueryParams {
    /// Validate limits and date formats
    pub fn validate(&self) -> AppResult<()> {
        if let Some(limit) = self.limit {
            if limit > limits::MAX_QUERY_LIMIT {
                return Err(AppError::invalid_input(format!(
                    "limit cannot exceed {}",
                    limits::MAX_QUERY_LIMIT
                )));
            }
        }
        validate_date("date_start", self.date_start.as_deref())?;
        validate_date("date_end", self.date_end.as_deref())?;
        Ok(())
    }

    /// Base query pairs; unset fields are omitted
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("metric", self.metric.clone())];
        push_opt(&mut pairs, "filters", self.filters.clone());
        push_opt(&mut pairs, "primary_group", self.primary_group.clone());
        push_opt(&mut pairs, "sort_by", self.sort_by.clone());
        push_opt(
            &mut pairs,
            "sort_order",
            self.sort_order.map(|o| o.as_str().into()),
        );
        push_opt(
            &mut pairs,
            "date_range",
            self.date_range.map(|r| r.as_str().into()),
        );
        push_opt(&mut pairs, "date_start", self.date_start.clone());
        push_opt(&mut pairs, "date_end", self.date_end.clone());
        push_opt(&mut pairs, "page", self.page.map(|p| p.to_string()));
        push_opt(&mut pairs, "limit", self.limit.map(|l| l.to_string()));
        pairs
    }
}

fn push_opt(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        pairs.push((key, value));
    }
}

fn push_flag(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<bool>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

fn validate_date(field: &str, value: Option<&str>) -> AppResult<()> {
    if let Some(value) = value {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            AppError::invalid_input(format!("{field} must be in 'YYYY-MM-DD' format"))
        })?;
    }
    Ok(())
}

/// Parameters for `/report/single_metric`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SingleMetricQueryParams {
    #[serde(flatten)]
    pub base: MetricQueryParams,
    /// Field used for date calculations
    pub date_field: Option<String>,
    pub date_resource: Option<String>,
    pub include_archived_jobs: Option<bool>,
    pub include_deleted_candidates: Option<bool>,
}

impl SingleMetricQueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.base.query_pairs();
        push_opt(&mut pairs, "date_field", self.date_field.clone());
        push_opt(&mut pairs, "date_resource", self.date_resource.clone());
        push_flag(&mut pairs, "include_archived_jobs", self.include_archived_jobs);
        push_flag(
            &mut pairs,
            "include_deleted_candidates",
            self.include_deleted_candidates,
        );
        pairs
    }
}

/// Parameters for `/report/trend`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendMetricQueryParams {
    #[serde(flatten)]
    pub base: MetricQueryParams,
    pub date_field: Option<String>,
    pub date_resource: Option<String>,
    /// Grouping interval, monthly when unset
    #[serde(default)]
    pub interval: Interval,
    pub include_archived_jobs: Option<bool>,
    pub include_deleted_candidates: Option<bool>,
}

impl TrendMetricQueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.base.query_pairs();
        push_opt(&mut pairs, "date_field", self.date_field.clone());
        push_opt(&mut pairs, "date_resource", self.date_resource.clone());
        pairs.push(("interval", self.interval.as_str().into()));
        push_flag(&mut pairs, "include_archived_jobs", self.include_archived_jobs);
        push_flag(
            &mut pairs,
            "include_deleted_candidates",
            self.include_deleted_candidates,
        );
        pairs
    }
}

const fn default_include_archived() -> Option<bool> {
    Some(true)
}

/// Parameters for `/report/breakdown`
#[derive(Debug, Clone, Deserialize)]
pub struct BreakdownMetricQueryParams {
    #[serde(flatten)]
    pub base: MetricQueryParams,
    pub date_field: Option<String>,
    pub date_resource: Option<String>,
    /// Secondary grouping attribute
    pub secondary_group: Option<String>,
    /// Breakdown reports include archived jobs unless told otherwise
    #[serde(default = "default_include_archived")]
    pub include_archived_jobs: Option<bool>,
    pub include_archived_requisitions: Option<bool>,
    pub include_deleted_candidates: Option<bool>,
    /// Disable filtering by date
    pub show_all_data: Option<bool>,
}

impl Default for BreakdownMetricQueryParams {
    fn default() -> Self {
        Self {
            base: MetricQueryParams::default(),
            date_field: None,
            date_resource: None,
            secondary_group: None,
            include_archived_jobs: default_include_archived(),
            include_archived_requisitions: None,
            include_deleted_candidates: None,
            show_all_data: None,
        }
    }
}

impl BreakdownMetricQueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.base.query_pairs();
        push_opt(&mut pairs, "date_field", self.date_field.clone());
        push_opt(&mut pairs, "date_resource", self.date_resource.clone());
        push_opt(&mut pairs, "secondary_group", self.secondary_group.clone());
        push_flag(&mut pairs, "include_archived_jobs", self.include_archived_jobs);
        push_flag(
            &mut pairs,
            "include_archived_requisitions",
            self.include_archived_requisitions,
        );
        push_flag(
            &mut pairs,
            "include_deleted_candidates",
            self.include_deleted_candidates,
        );
        push_flag(&mut pairs, "show_all_data", self.show_all_data);
        pairs
    }
}

/// Parameters for `/report/funnel`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunnelMetricQueryParams {
    #[serde(flatten)]
    pub base: MetricQueryParams,
    pub date_field: Option<String>,
    pub date_resource: Option<String>,
}

impl FunnelMetricQueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.base.query_pairs();
        push_opt(&mut pairs, "date_field", self.date_field.clone());
        push_opt(&mut pairs, "date_resource", self.date_resource.clone());
        pairs
    }
}

/// Parameters for `/report/time_based`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeBasedMetricQueryParams {
    #[serde(flatten)]
    pub base: MetricQueryParams,
    pub start_point: Option<StartPoint>,
    pub end_point: Option<EndPoint>,
    pub include_archived_jobs: Option<bool>,
    pub include_archived_requisitions: Option<bool>,
    pub include_deleted_candidates: Option<bool>,
}

impl TimeBasedMetricQueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.base.query_pairs();
        push_opt(
            &mut pairs,
            "start_point",
            self.start_point.map(|p| p.as_str().into()),
        );
        push_opt(
            &mut pairs,
            "end_point",
            self.end_point.map(|p| p.as_str().into()),
        );
        push_flag(&mut pairs, "include_archived_jobs", self.include_archived_jobs);
        push_flag(
            &mut pairs,
            "include_archived_requisitions",
            self.include_archived_requisitions,
        );
        push_flag(
            &mut pairs,
            "include_deleted_candidates",
            self.include_deleted_candidates,
        );
        pairs
    }
}

/// Reduce a report response to its results and meta sections
fn report_payload(data: &Value) -> Value {
    json!({
        "results": data.get("results").cloned().unwrap_or_else(|| json!({})),
        "meta": data.get("meta").cloned().unwrap_or_else(|| json!({})),
    })
}

impl RecruiteeApi {
    /// Available recruitment metrics (metric, name, resource, kind)
    pub async fn list_metrics(&self) -> AppResult<Vec<Value>> {
        Ok(self
            .cached_metrics()
            .await?
            .iter()
            .map(|m| {
                json!({
                    "metric": m.get("metric"),
                    "name": m.get("name"),
                    "resource": m.get("resource"),
                    "kind": m.get("kind"),
                })
            })
            .collect())
    }

    /// Full catalog entries for the named metrics, including available
    /// filters and groups
    pub async fn get_metric_details(&self, metrics: &[String]) -> AppResult<Vec<Value>> {
        if metrics.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .cached_metrics()
            .await?
            .into_iter()
            .filter(|m| {
                m.get("metric")
                    .and_then(Value::as_str)
                    .is_some_and(|name| metrics.iter().any(|wanted| wanted == name))
            })
            .collect())
    }

    pub async fn get_single_metric_data(
        &self,
        params: &SingleMetricQueryParams,
    ) -> AppResult<Value> {
        params.base.validate()?;
        let data = self
            .client()
            .get_query("/report/single_metric", &params.query_pairs())
            .await?;
        Ok(report_payload(&data))
    }

    pub async fn get_trend_metric_data(&self, params: &TrendMetricQueryParams) -> AppResult<Value> {
        params.base.validate()?;
        let data = self
            .client()
            .get_query("/report/trend", &params.query_pairs())
            .await?;
        Ok(report_payload(&data))
    }

    pub async fn get_breakdown_metric_data(
        &self,
        params: &BreakdownMetricQueryParams,
    ) -> AppResult<Value> {
        params.base.validate()?;
        let data = self
            .client()
            .get_query("/report/breakdown", &params.query_pairs())
            .await?;
        Ok(report_payload(&data))
    }

    pub async fn get_funnel_metric_data(
        &self,
        params: &FunnelMetricQueryParams,
    ) -> AppResult<Value> {
        params.base.validate()?;
        let data = self
            .client()
            .get_query("/report/funnel", &params.query_pairs())
            .await?;
        Ok(report_payload(&data))
    }

    pub async fn get_time_based_metric_data(
        &self,
        params: &TimeBasedMetricQueryParams,
    ) -> AppResult<Value> {
        params.base.validate()?;
        let data = self
            .client()
            .get_query("/report/time_based", &params.query_pairs())
            .await?;
        Ok(report_payload(&data))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_base_query_omits_unset_fields() {
        let params = MetricQueryParams {
            metric: "fill_rate".into(),
            ..Default::default()
        };
        assert_eq!(params.query_pairs(), vec![("metric", "fill_rate".to_string())]);
    }

    #[test]
    fn test_breakdown_query_pairs() {
        let params = BreakdownMetricQueryParams {
            base: MetricQueryParams {
                metric: "disqualifications".into(),
                filters: Some("job:2114902".into()),
                primary_group: Some("disqualify-reason".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let pairs = params.query_pairs();
        assert!(pairs.contains(&("metric", "disqualifications".into())));
        assert!(pairs.contains(&("filters", "job:2114902".into())));
        assert!(pairs.contains(&("primary_group", "disqualify-reason".into())));
        // archived jobs are included by default for breakdowns
        assert!(pairs.contains(&("include_archived_jobs", "true".into())));
    }

    #[test]
    fn test_trend_interval_defaults_to_monthly() {
        let params: TrendMetricQueryParams =
            serde_json::from_value(json!({"metric": "disqualifications_over_time"})).unwrap();
        assert!(params.query_pairs().contains(&("interval", "monthly".into())));

        let params: TrendMetricQueryParams = serde_json::from_value(
            json!({"metric": "disqualifications_over_time", "interval": "weekly"}),
        )
        .unwrap();
        assert!(params.query_pairs().contains(&("interval", "weekly".into())));
    }

    #[test]
    fn test_time_based_points_serialize_snake_case() {
        let params: TimeBasedMetricQueryParams = serde_json::from_value(json!({
            "metric": "time_to_hire",
            "start_point": "candidate_applied",
            "end_point": "candidate_hired"
        }))
        .unwrap();
        let pairs = params.query_pairs();
        assert!(pairs.contains(&("start_point", "candidate_applied".into())));
        assert!(pairs.contains(&("end_point", "candidate_hired".into())));
    }

    #[test]
    fn test_validation_rejects_excess_limit_and_bad_dates() {
        let params = MetricQueryParams {
            metric: "jobs".into(),
            limit: Some(10_001),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = MetricQueryParams {
            metric: "jobs".into(),
            date_start: Some("20-05-2025".into()),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = MetricQueryParams {
            metric: "jobs".into(),
            date_range: Some(DateRange::Range),
            date_start: Some("2025-05-01".into()),
            date_end: Some("2025-05-31".into()),
            limit: Some(30),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_date_range_spelling() {
        let range: DateRange = serde_json::from_value(json!("last_90_days")).unwrap();
        assert_eq!(range.as_str(), "last_90_days");
        let range: DateRange = serde_json::from_value(json!("all_time")).unwrap();
        assert_eq!(range.as_str(), "all_time");
    }

    #[test]
    fn test_report_payload_defaults_to_empty_objects() {
        assert_eq!(
            report_payload(&json!({"unexpected": 1})),
            json!({"results": {}, "meta": {}})
        );
        let data = json!({"results": {"value": 3}, "meta": {"page": 1}});
        assert_eq!(
            report_payload(&data),
            json!({"results": {"value": 3}, "meta": {"page": 1}})
        );
    }
}
