//! End-to-end tests for report building and export

use crate::utils::{case_on, three_case_scenario};
use chrono::NaiveDate;
use site_analysis::report::export::{CASE_LOG_CSV, DAILY_CSV, REPORT_JSON, write_report};
use site_analysis::{AnalysisConfig, AnalysisReport, Case, ReportBuilder};
use std::collections::BTreeMap;
use std::fs;
use tempfile::tempdir;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

fn config() -> AnalysisConfig {
    AnalysisConfig {
        contract_sites: 3,
        whatif_capacities: vec![2, 1],
        samples_per_day: 1,
        ..AnalysisConfig::default()
    }
}

/// Saturday 4th, Monday 6th (three-case scenario), Tuesday 7th and a
/// Wednesday 8th holding a zero-length case
fn cases() -> Vec<Case> {
    let mut cases = three_case_scenario();
    cases.extend([
        case_on("tue-a", date(7), (8, 0), (9, 0)),
        case_on("tue-b", date(7), (9, 0), (10, 0)),
        case_on("sat", date(4), (9, 0), (10, 0)),
        case_on("wed-bad", date(8), (9, 0), (9, 0)),
    ]);
    cases
}

fn build(config: AnalysisConfig) -> AnalysisReport {
    let scheduled = BTreeMap::from([(date(6), 3), (date(7), 3)]);
    ReportBuilder::new()
        .with_config(config)
        .with_scheduled_sites(scheduled)
        .build(&cases())
        .unwrap()
}

#[test]
fn test_daily_rows_and_skipped_days() {
    let report = build(config());

    let dates: Vec<NaiveDate> = report.daily.iter().map(|row| row.date).collect();
    assert_eq!(dates, vec![date(4), date(6), date(7)]);

    assert_eq!(report.skipped_days.len(), 1);
    assert_eq!(report.skipped_days[0].date, date(8));
    assert_eq!(report.skipped_days[0].case_count, 1);
    assert!(report.skipped_days[0].error.contains("wed-bad"));

    let monday = &report.daily[1];
    assert_eq!(monday.dow, "Mon");
    assert!(monday.is_weekday);
    assert_eq!(monday.total_cases, 3);
    assert_eq!(monday.min_sites_with_buffers, 3);
    assert_eq!(monday.min_sites_no_buffers, 2);
    assert_eq!(monday.peak_concurrent, 3);
    assert_eq!(monday.committed_mins, 3 * 105);
    assert_eq!(monday.capacity_mins, 3 * 12 * 60);
    assert_eq!(monday.whatif_uncovered.get(&2), Some(&1));
    assert_eq!(monday.whatif_uncovered.get(&1), Some(&2));

    let tuesday = &report.daily[2];
    assert_eq!(tuesday.min_sites_with_buffers, 2);
    assert_eq!(tuesday.min_sites_no_buffers, 1);

    assert!(!report.daily[0].is_weekday);
    assert_eq!(report.meta.total_cases, 6);
    assert_eq!(report.meta.first_date, Some(date(4)));
    assert_eq!(report.meta.last_date, Some(date(7)));
    assert_eq!(report.meta.weekday_count, 2);
    assert_eq!(report.meta.weekend_count, 1);
    assert_eq!(report.case_log.len(), 6);
    assert!(report.case_log.iter().all(|entry| entry.case_id != "wed-bad"));
}

#[test]
fn test_summary_covers_weekdays() {
    let summary = build(config()).summary;
    assert_eq!(summary.total_weekdays, 2);
    assert_eq!(summary.max_min_sites_needed, 3);
    assert!((summary.avg_min_sites_needed - 2.5).abs() < f64::EPSILON);
    assert!((summary.avg_weekday_cases - 2.5).abs() < f64::EPSILON);
    assert_eq!(summary.days_needing_contract_or_more, 1);
    assert_eq!(summary.whatif_uncovered.get(&2), Some(&1));
    assert_eq!(summary.whatif_uncovered.get(&1), Some(&3));
}

#[test]
fn test_holidays_are_flagged_but_still_counted() {
    let holiday = AnalysisConfig {
        holidays: vec![date(7)],
        ..config()
    };
    let report = build(holiday);
    let plain = build(config());

    assert!(report.daily[2].is_holiday);
    assert!(!report.daily[1].is_holiday);
    assert_eq!(report.summary, plain.summary);
    assert_eq!(report.summary.total_weekdays, 2);
    assert_eq!(report.cross_validation.len(), 2);

    // Tuesday still contributes to the heatmap
    assert_eq!(report.heatmap, plain.heatmap);
    let slot = report.heatmap.iter().find(|slot| slot.time == "09:30").unwrap();
    assert!((slot.avg_concurrent - 1.5).abs() < f64::EPSILON);
    assert_eq!(report.heatmap_by_month.get("2025-10"), Some(&plain.heatmap));
}

#[test]
fn test_whatif_aggregates_and_samples() {
    let report = build(config());
    assert_eq!(report.whatif.len(), 2);

    let two = &report.whatif[0];
    assert_eq!(two.capacity, 2);
    assert_eq!(two.total_uncovered, 1);
    assert_eq!(two.days_affected, 1);
    assert_eq!(two.samples.len(), 1);
    assert_eq!(two.samples[0].case_id, "case3");
    assert_eq!(two.samples[0].start, "10:00");

    let one = &report.whatif[1];
    assert_eq!(one.capacity, 1);
    assert_eq!(one.total_uncovered, 3);
    assert_eq!(one.days_affected, 2);
    // One sample per day
    assert_eq!(one.samples.len(), 2);
    assert_eq!(one.samples[1].case_id, "tue-b");
}

#[test]
fn test_cross_validation_against_schedule() {
    let report = build(config());
    assert_eq!(report.cross_validation.len(), 2);

    let monday = &report.cross_validation[0];
    assert_eq!(monday.algorithm_min_sites, 3);
    assert_eq!(monday.scheduled_sites, Some(3));
    assert_eq!(monday.delta(), Some(0));
    assert_eq!(report.cross_validation[1].delta(), Some(-1));

    assert_eq!(report.agreement.rows_with_schedule, 2);
    assert_eq!(report.agreement.algorithm_at_or_above_contract, 1);
    assert_eq!(report.agreement.scheduled_at_or_above_contract, 2);
    assert_eq!(report.agreement.both_at_or_above_contract, 1);
}

#[test]
fn test_heatmap_over_weekdays() {
    let report = build(config());
    assert_eq!(report.heatmap.len(), 48);

    let slot = report
        .heatmap
        .iter()
        .find(|slot| slot.time == "09:30")
        .unwrap();
    assert_eq!(slot.max_concurrent, 2);
    assert!((slot.avg_concurrent - 1.5).abs() < f64::EPSILON);
    assert_eq!(slot.max_concurrent_buffered, 3);
    assert!((slot.avg_concurrent_buffered - 2.0).abs() < f64::EPSILON);

    assert_eq!(report.heatmap_by_month.len(), 1);
    assert_eq!(report.heatmap_by_month.get("2025-10"), Some(&report.heatmap));
}

#[test]
fn test_empty_case_list() {
    let report = ReportBuilder::new().build(&[]).unwrap();
    assert!(report.daily.is_empty());
    assert!(report.skipped_days.is_empty());
    assert_eq!(report.summary.total_weekdays, 0);
    assert_eq!(report.meta.first_date, None);
    assert!(report.heatmap.iter().all(|slot| slot.max_concurrent == 0));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = AnalysisConfig {
        whatif_capacities: vec![0],
        ..AnalysisConfig::default()
    };
    let result = ReportBuilder::new().with_config(config).build(&cases());
    assert!(result.is_err());
}

#[test]
fn test_write_report_files() {
    let report = build(config());
    let dir = tempdir().unwrap();
    let out = dir.path().join("nested");

    let written = write_report(&report, &[2, 1], &out).unwrap();
    assert_eq!(written.len(), 4);
    assert!(written.iter().all(|path| path.is_file()));

    let json = fs::read_to_string(out.join(REPORT_JSON)).unwrap();
    let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.daily.len(), report.daily.len());
    assert_eq!(parsed.skipped_days, report.skipped_days);
    assert!(json.contains("\"minSitesWithBuffers\""));

    let daily = fs::read_to_string(out.join(DAILY_CSV)).unwrap();
    let mut lines = daily.lines();
    assert!(lines.next().unwrap().ends_with("whatif2Uncovered,whatif1Uncovered"));
    assert_eq!(lines.count(), 3);

    let case_log = fs::read_to_string(out.join(CASE_LOG_CSV)).unwrap();
    assert_eq!(case_log.lines().count(), 7);

    // Scratch directory is removed on drop
    let root = dir.path().to_path_buf();
    drop(dir);
    assert!(!root.exists());
}
