//! Case export loading utilities
//!
//! Reads de-identified case exports (JSON arrays of records) into `Case`
//! values. Ingestion is lenient where the engine is strict: records with
//! missing or unparseable timestamps, or with `end <= start`, are skipped
//! and counted rather than failing the whole load.

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use crate::algorithm::classify_site;
use crate::error::util::safe_read_to_string;
use crate::error::{Result, SiteAnalysisError};
use crate::models::{Case, SiteType};
use crate::utils::logging::{log_file_complete, log_file_start, log_warning};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Case identifier as it appears in exports: text or a running number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCaseId {
    Number(u64),
    Text(String),
}

impl RawCaseId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// One record of a case export before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCaseRecord {
    pub case_id: Option<RawCaseId>,
    pub date: Option<String>,
    pub anesthesia_start: Option<String>,
    pub anesthesia_end: Option<String>,
    pub site_type: Option<String>,
    pub procedure: Option<String>,
    pub form_title: Option<String>,
}

/// Counts describing what happened to the records of an export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    /// Records in the export
    pub total_records: usize,
    /// Cases kept for analysis
    pub loaded: usize,
    /// Records skipped for missing or invalid times
    pub skipped_invalid: usize,
    /// L&D cases dropped
    pub excluded_labor_delivery: usize,
}

/// Parse a timestamp in any of the accepted export formats
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| SiteAnalysisError::parse(format!("Unrecognised timestamp: {value:?}")))
}

/// Parse a `YYYY-MM-DD` date, also accepting a full timestamp
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| parse_datetime(value).map(|dt| dt.date()))
        .map_err(|_| SiteAnalysisError::parse(format!("Unrecognised date: {value:?}")))
}

/// Convert one raw record. `fallback_id` is used when the record has no id.
pub fn parse_record(record: RawCaseRecord, fallback_id: usize) -> Result<Case> {
    let start = record
        .anesthesia_start
        .as_deref()
        .ok_or_else(|| SiteAnalysisError::parse("Missing anesthesia start"))
        .and_then(parse_datetime)?;
    let end = record
        .anesthesia_end
        .as_deref()
        .ok_or_else(|| SiteAnalysisError::parse("Missing anesthesia end"))
        .and_then(parse_datetime)?;
    let date = match record.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => start.date(),
    };

    let procedure = record.procedure.unwrap_or_default();
    let form_title = record.form_title.unwrap_or_default();
    let site_type = record
        .site_type
        .as_deref()
        .and_then(SiteType::from_label)
        .unwrap_or_else(|| classify_site(&form_title, &procedure));
    let case_id = record
        .case_id
        .map_or_else(|| fallback_id.to_string(), RawCaseId::into_string);

    let case = Case::new(case_id, date, start, end)
        .with_site_type(site_type)
        .with_procedure(procedure, form_title);
    case.validate()?;
    Ok(case)
}

/// Convert raw records into cases, skipping records that cannot be used
#[must_use]
pub fn parse_cases(records: Vec<RawCaseRecord>, exclude_labor_delivery: bool) -> (Vec<Case>, LoadReport) {
    let mut report = LoadReport {
        total_records: records.len(),
        ..LoadReport::default()
    };
    let mut cases = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let case = match parse_record(record, index + 1) {
            Ok(case) => case,
            Err(e) => {
                debug!("Skipping record {}: {e}", index + 1);
                report.skipped_invalid += 1;
                continue;
            }
        };

        if exclude_labor_delivery && case.site_type == SiteType::LaborDelivery {
            report.excluded_labor_delivery += 1;
            continue;
        }

        cases.push(case);
    }

    report.loaded = cases.len();
    if report.skipped_invalid > 0 {
        warn!(
            "Skipped {} of {} records with missing or invalid times",
            report.skipped_invalid, report.total_records
        );
    }
    (cases, report)
}

/// Load a JSON case export
pub fn load_cases(path: &Path, exclude_labor_delivery: bool) -> Result<(Vec<Case>, LoadReport)> {
    let start = Instant::now();
    log_file_start("Loading case export", path);

    let content = safe_read_to_string(path, "case export")?;
    let records: Vec<RawCaseRecord> = serde_json::from_str(&content)?;
    let (cases, report) = parse_cases(records, exclude_labor_delivery);

    if cases.is_empty() {
        log_warning("No usable cases found in export", Some(path));
    }
    info!(
        "Loaded {} cases ({} invalid, {} L&D excluded)",
        report.loaded, report.skipped_invalid, report.excluded_labor_delivery
    );
    log_file_complete("loaded", path, cases.len(), "cases", Some(start.elapsed()));
    Ok((cases, report))
}

/// Load scheduled site counts keyed by date (`{"2025-10-01": 10, ...}`)
pub fn load_scheduled_sites(path: &Path) -> Result<BTreeMap<NaiveDate, usize>> {
    log_file_start("Loading scheduled sites", path);
    let content = safe_read_to_string(path, "scheduled sites")?;
    let raw: BTreeMap<String, usize> = serde_json::from_str(&content)?;

    let scheduled = raw
        .into_iter()
        .map(|(date, sites)| parse_date(&date).map(|date| (date, sites)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    log_file_complete("loaded", path, scheduled.len(), "scheduled days", None);
    Ok(scheduled)
}
