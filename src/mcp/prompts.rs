// ABOUTME: Static prompt texts served as tools: candidate formatting, server guidelines, report template
// ABOUTME: The originals are registered as tools rather than MCP prompts so every client can reach them
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

/// Prompt used to format full candidate details for display
pub const CANDIDATE_DETAILS_PROMPT: &str = r#"
Use get_candidate tool to get full candidate data.
You receive a single JSON payload with two top-level keys:

* `candidate` – personal and application data
* `references` – array that may include the related job offer, pipeline stages, etc.

Your task is to extract the most relevant information and present it in **plain text** (no markdown, no code fences).
Structure the output into the following sections, using exactly the headings shown (uppercase, followed by a colon).
Omit any heading if none of its fields are available.

---

### GENERAL DETAILS:
* **Full name:** `<candidate.name>`
* **Tags:** comma-separated list from `candidate.tags`
* **CV:** `<candidate.cv_url>` (if available)
* **Created at:** `<candidate.created_at>` (ISO date)

### CONTACT:
* **Primary email:** first item in `candidate.emails`
* **Primary phone:** first item in `candidate.phones`
* **Location:**
  * From `references` → first object of type `"Offer"` → `location`
  * If absent, fall back to `candidate.fields.kind=="address"` → first `values[0].text`

### APPLICATION INFO:
* **Position applied for:** `references` object of type `"Offer"` → `title`
* **Department:** same object → `department`
* **Current stage:**
  * In `candidate.placements[0]` → use matching `stage_id` to find stage name in `references` array
* **Placement status:**
  * If `candidate.placements[0].disqualified_at` is non-null, show **Disqualified** and quote `disqualify_reason`
  * Else if `candidate.is_hired` is true, show **Hired**
  * Else show **Active**

### SKILLS & LANGUAGES:
* **Languages:** list `language_name (level)` from field `kind=="language_skill"`
* **Skills:** list up to 8 unique entries from field `kind=="skills"`; omit duplicates

### SALARY EXPECTATION:
* If a field named "Salary expectation" exists (`kind=="single_line"` and `name` matches, case-insensitive), print its first value.

### COVER LETTER (FIRST 2 LINES):
Print only the first two newline-separated lines of `candidate.cover_letter` (trim whitespace). Omit if not present.

### NOTES:
Show candidate notes as "Internal notes: X".

---

**Formatting rules**
Use markdown formatting.
"#;

/// General guidelines clients should load before using any other tool
pub const INSTRUCTIONS: &str = "
Don't calculate statistics on your own if they can be fetched from metric tools.
";

/// Instructions plus a markdown template for a recruitment report
pub const RECRUITMENT_REPORT_PROMPT: &str = r"
Build a recruitment report for the requested period. Fetch every number
with the metric tools (list_metrics, get_metric_details, and the
get_*_metric_data fetchers); never estimate values yourself.

# Recruitment Report

## Summary
- Reporting period:
- Open positions (from list_offers):
- New candidates (metric: candidates):
- Hires (metric: hires):
- Disqualifications (metric: disqualifications):

## Pipeline
For each active offer, list the pipeline stages (get_offer_stages) and
the number of candidates currently on each stage.

## Sources & Trends
- Candidate trend over the period (get_trend_metric_data, monthly interval)
- Breakdown by disqualify reason (get_breakdown_metric_data,
  primary_group=disqualify-reason)
- Time to hire (get_time_based_metric_data, start_point=candidate_applied,
  end_point=candidate_hired)

## Notes
Add observations that follow directly from the fetched data. Mark any
number that could not be fetched as 'n/a' instead of guessing.
";
