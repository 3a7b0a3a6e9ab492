//! Report row and summary types
//!
//! These mirror the tables the web report consumes. All fields serialize in
//! camelCase.

use crate::algorithm::ConcurrencySlot;
use crate::loader::LoadReport;
use crate::models::{Case, SiteType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the daily analysis table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAnalysisRow {
    pub date: NaiveDate,
    /// Short weekday name (`Mon`, `Tue`, ...)
    pub dow: String,
    pub is_weekday: bool,
    /// Date is in the configured holiday list (informational only)
    pub is_holiday: bool,
    pub total_cases: usize,
    pub min_sites_with_buffers: usize,
    pub min_sites_no_buffers: usize,
    /// Sum of buffered case durations
    pub committed_mins: i64,
    /// Contracted site-minutes for the day
    pub capacity_mins: i64,
    pub utilization_pct: f64,
    /// Largest number of buffered cases in progress at once
    pub peak_concurrent: usize,
    /// Uncovered case count keyed by what-if capacity
    pub whatif_uncovered: BTreeMap<usize, usize>,
}

/// A case turned away under a what-if capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfSample {
    pub date: NaiveDate,
    pub case_id: String,
    pub procedure: String,
    pub site_type: SiteType,
    /// Anesthesia start as `HH:MM`
    pub start: String,
    /// Anesthesia end as `HH:MM`
    pub end: String,
}

/// What-if results for one capacity across all days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfAggregate {
    pub capacity: usize,
    pub total_uncovered: usize,
    pub days_affected: usize,
    pub samples: Vec<WhatIfSample>,
}

/// Algorithm minimum next to the manually reviewed schedule for one weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossValidationRow {
    pub date: NaiveDate,
    pub dow: String,
    pub total_cases: usize,
    pub algorithm_min_sites: usize,
    pub algorithm_min_sites_no_buf: usize,
    pub scheduled_sites: Option<usize>,
}

impl CrossValidationRow {
    /// Algorithm minimum minus scheduled sites, when a schedule is known
    #[must_use]
    pub fn delta(&self) -> Option<i64> {
        self.scheduled_sites
            .map(|scheduled| self.algorithm_min_sites as i64 - scheduled as i64)
    }
}

/// How often algorithm and schedule agree that the contract level is needed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossValidationAgreement {
    pub rows_with_schedule: usize,
    pub algorithm_at_or_above_contract: usize,
    pub scheduled_at_or_above_contract: usize,
    pub both_at_or_above_contract: usize,
}

/// Headline figures over weekdays. Holidays are flagged in the daily
/// table but still counted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub avg_weekday_cases: f64,
    pub avg_weekday_committed_mins: f64,
    pub avg_min_sites_needed: f64,
    pub max_min_sites_needed: usize,
    pub days_needing_contract_or_more: usize,
    pub total_weekdays: usize,
    pub whatif_uncovered: BTreeMap<usize, usize>,
    pub avg_peak_concurrent: f64,
}

/// De-identified case log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseLogEntry {
    pub case_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration_mins: i64,
    pub site_type: SiteType,
    pub procedure: String,
    pub form_title: String,
}

/// Maximum procedure length kept in the case log
pub const CASE_LOG_PROCEDURE_CHARS: usize = 60;

impl From<&Case> for CaseLogEntry {
    fn from(case: &Case) -> Self {
        Self {
            case_id: case.case_id.clone(),
            date: case.date,
            start_time: case.anesthesia_start.format("%H:%M").to_string(),
            end_time: case.anesthesia_end.format("%H:%M").to_string(),
            duration_mins: case.duration_mins(),
            site_type: case.site_type,
            procedure: truncate_chars(&case.procedure, CASE_LOG_PROCEDURE_CHARS),
            form_title: case.form_title.clone(),
        }
    }
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// A day left out of the report because its cases failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedDay {
    pub date: NaiveDate,
    pub case_count: usize,
    pub error: String,
}

/// Run parameters and dataset counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMeta {
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Cases on analyzed days; skipped days are not counted
    pub total_cases: usize,
    pub weekday_count: usize,
    pub weekend_count: usize,
    pub pre_case_buffer_min: i64,
    pub post_case_buffer_min: i64,
    pub contract_sites: usize,
    pub load: Option<LoadReport>,
}

/// Complete analysis output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub meta: AnalysisMeta,
    pub summary: AnalysisSummary,
    pub daily: Vec<DailyAnalysisRow>,
    pub heatmap: Vec<ConcurrencySlot>,
    /// Heatmaps keyed by `YYYY-MM`
    pub heatmap_by_month: BTreeMap<String, Vec<ConcurrencySlot>>,
    pub whatif: Vec<WhatIfAggregate>,
    pub cross_validation: Vec<CrossValidationRow>,
    pub agreement: CrossValidationAgreement,
    pub case_log: Vec<CaseLogEntry>,
    pub skipped_days: Vec<SkippedDay>,
}
