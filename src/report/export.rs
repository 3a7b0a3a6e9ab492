//! Report export
//!
//! Writes the report as pretty JSON plus CSV tables for the daily analysis,
//! cross-validation and case log. CSV fields are quoted per RFC 4180 when
//! they contain a comma, quote or line break.

use crate::error::Result;
use crate::error::util::{safe_write, validate_directory};
use crate::report::types::{AnalysisReport, CaseLogEntry, CrossValidationRow, DailyAnalysisRow};
use crate::utils::logging::{log_file_complete, log_file_start};
use std::path::{Path, PathBuf};

/// File names written by `write_report`
pub const REPORT_JSON: &str = "report.json";
pub const DAILY_CSV: &str = "daily.csv";
pub const CROSS_VALIDATION_CSV: &str = "cross_validation.csv";
pub const CASE_LOG_CSV: &str = "case_log.csv";

/// Quote a CSV field when needed
#[must_use]
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = fields
        .into_iter()
        .map(|field| csv_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Daily analysis table, one what-if column per capacity
#[must_use]
pub fn daily_csv(rows: &[DailyAnalysisRow], capacities: &[usize]) -> String {
    let mut header = vec![
        "date".to_string(),
        "dow".to_string(),
        "isWeekday".to_string(),
        "isHoliday".to_string(),
        "totalCases".to_string(),
        "minSitesWithBuffers".to_string(),
        "minSitesNoBuffers".to_string(),
        "committedMins".to_string(),
        "capacityMins".to_string(),
        "utilizationPct".to_string(),
        "peakConcurrent".to_string(),
    ];
    header.extend(capacities.iter().map(|k| format!("whatif{k}Uncovered")));

    let mut out = csv_line(header);
    for row in rows {
        let mut fields = vec![
            row.date.to_string(),
            row.dow.clone(),
            row.is_weekday.to_string(),
            row.is_holiday.to_string(),
            row.total_cases.to_string(),
            row.min_sites_with_buffers.to_string(),
            row.min_sites_no_buffers.to_string(),
            row.committed_mins.to_string(),
            row.capacity_mins.to_string(),
            format!("{:.1}", row.utilization_pct),
            row.peak_concurrent.to_string(),
        ];
        fields.extend(
            capacities
                .iter()
                .map(|k| row.whatif_uncovered.get(k).copied().unwrap_or(0).to_string()),
        );
        out.push_str(&csv_line(fields));
    }
    out
}

/// Cross-validation table. Unknown scheduled counts are left empty.
#[must_use]
pub fn cross_validation_csv(rows: &[CrossValidationRow]) -> String {
    let mut out = csv_line([
        "date",
        "dow",
        "totalCases",
        "algorithmMinSites",
        "algorithmMinSitesNoBuf",
        "scheduledSites",
        "delta",
    ]);
    for row in rows {
        out.push_str(&csv_line([
            row.date.to_string(),
            row.dow.clone(),
            row.total_cases.to_string(),
            row.algorithm_min_sites.to_string(),
            row.algorithm_min_sites_no_buf.to_string(),
            row.scheduled_sites.map(|s| s.to_string()).unwrap_or_default(),
            row.delta().map(|d| d.to_string()).unwrap_or_default(),
        ]));
    }
    out
}

/// De-identified case log
#[must_use]
pub fn case_log_csv(entries: &[CaseLogEntry]) -> String {
    let mut out = csv_line([
        "caseId",
        "date",
        "startTime",
        "endTime",
        "durationMins",
        "siteType",
        "procedure",
        "formTitle",
    ]);
    for entry in entries {
        out.push_str(&csv_line([
            entry.case_id.clone(),
            entry.date.to_string(),
            entry.start_time.clone(),
            entry.end_time.clone(),
            entry.duration_mins.to_string(),
            entry.site_type.label().to_string(),
            entry.procedure.clone(),
            entry.form_title.clone(),
        ]));
    }
    out
}

/// Write the JSON report and CSV tables into `out_dir`, creating it if
/// needed. Returns the paths written.
pub fn write_report(report: &AnalysisReport, capacities: &[usize], out_dir: &Path) -> Result<Vec<PathBuf>> {
    log_file_start("Writing report to", out_dir);
    validate_directory(out_dir, "report output", true)?;

    let files = [
        (REPORT_JSON, serde_json::to_string_pretty(report)?),
        (DAILY_CSV, daily_csv(&report.daily, capacities)),
        (CROSS_VALIDATION_CSV, cross_validation_csv(&report.cross_validation)),
        (CASE_LOG_CSV, case_log_csv(&report.case_log)),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = out_dir.join(name);
        safe_write(&path, &content, name)?;
        written.push(path);
    }

    log_file_complete("wrote", out_dir, written.len(), "files", None);
    Ok(written)
}
