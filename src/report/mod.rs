//! Batch report generation
//!
//! Partitions a case list by date, analyzes every day in parallel and
//! assembles the tables consumed by the web report. A day whose cases fail
//! validation is skipped and listed in `skipped_days`; it never aborts the
//! run.

pub mod day;
pub mod export;
pub mod statistics;
pub mod types;

pub use day::{DayAnalysis, analyze_day};
pub use types::{
    AnalysisMeta, AnalysisReport, AnalysisSummary, CaseLogEntry, CrossValidationAgreement,
    CrossValidationRow, DailyAnalysisRow, SkippedDay, WhatIfAggregate, WhatIfSample,
};

use crate::algorithm::concurrency_heatmap;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::loader::LoadReport;
use crate::models::Case;
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar, log_skipped_day};
use chrono::NaiveDate;
use itertools::Itertools;
use log::info;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::Instant;

/// Group cases by date, keeping input order within each day
#[must_use]
pub fn group_by_date(cases: &[Case]) -> BTreeMap<NaiveDate, Vec<Case>> {
    cases
        .iter()
        .cloned()
        .into_group_map_by(|case| case.date)
        .into_iter()
        .collect()
}

/// Builder for an `AnalysisReport`
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    config: AnalysisConfig,
    scheduled_sites: BTreeMap<NaiveDate, usize>,
    load_report: Option<LoadReport>,
}

impl ReportBuilder {
    /// Create a builder with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given configuration
    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Scheduled site counts for cross-validation
    #[must_use]
    pub fn with_scheduled_sites(mut self, scheduled_sites: BTreeMap<NaiveDate, usize>) -> Self {
        self.scheduled_sites = scheduled_sites;
        self
    }

    /// Record ingestion counts in the report metadata
    #[must_use]
    pub fn with_load_report(mut self, load_report: LoadReport) -> Self {
        self.load_report = Some(load_report);
        self
    }

    /// Analyze all cases and build the report
    pub fn build(&self, cases: &[Case]) -> Result<AnalysisReport> {
        let config = &self.config;
        config.validate()?;
        let buffers = config.buffers()?;
        let start = Instant::now();

        let cases_by_date = group_by_date(cases);
        info!(
            "Analyzing {} cases over {} days",
            cases.len(),
            cases_by_date.len()
        );

        let pb = create_main_progress_bar(cases_by_date.len() as u64, Some("Analyzing days"));
        let outcomes: Vec<(NaiveDate, usize, Result<DayAnalysis>)> = cases_by_date
            .par_iter()
            .map(|(date, day_cases)| {
                let outcome = analyze_day(*date, day_cases, &buffers, config);
                pb.inc(1);
                (*date, day_cases.len(), outcome)
            })
            .collect();
        finish_progress_bar(&pb, Some("Days analyzed"));

        let mut days = Vec::with_capacity(outcomes.len());
        let mut skipped_days = Vec::new();
        for (date, case_count, outcome) in outcomes {
            match outcome {
                Ok(day) => days.push(day),
                Err(e) => {
                    log_skipped_day(date, case_count, &e);
                    skipped_days.push(SkippedDay {
                        date,
                        case_count,
                        error: e.to_string(),
                    });
                }
            }
        }

        let daily: Vec<DailyAnalysisRow> = days.iter().map(|day| day.to_row(config)).collect();

        let weekdays: Vec<(NaiveDate, &[Case])> = daily
            .iter()
            .filter(|row| row.is_weekday)
            .filter_map(|row| {
                cases_by_date
                    .get(&row.date)
                    .map(|cases| (row.date, cases.as_slice()))
            })
            .collect();

        let window = config.slot_window();
        let heatmap = concurrency_heatmap(&weekdays, &buffers, &window);
        let heatmap_by_month = weekdays
            .iter()
            .copied()
            .into_group_map_by(|(date, _)| date.format("%Y-%m").to_string())
            .into_iter()
            .map(|(month, month_days)| {
                (month, concurrency_heatmap(&month_days, &buffers, &window))
            })
            .collect::<BTreeMap<_, _>>();

        let summary = statistics::summarize(&daily, config);
        let whatif = statistics::aggregate_whatif(&days, &cases_by_date, config);
        let cross_validation = statistics::cross_validate(&daily, &self.scheduled_sites);
        let agreement = statistics::agreement(&cross_validation, config.contract_sites);

        // Cases of skipped days stay out of the log and the totals
        let case_log = daily
            .iter()
            .filter_map(|row| cases_by_date.get(&row.date))
            .flatten()
            .map(CaseLogEntry::from)
            .collect();

        let weekday_count = daily.iter().filter(|row| row.is_weekday).count();
        let meta = AnalysisMeta {
            first_date: daily.first().map(|row| row.date),
            last_date: daily.last().map(|row| row.date),
            total_cases: daily.iter().map(|row| row.total_cases).sum(),
            weekday_count,
            weekend_count: daily.len() - weekday_count,
            pre_case_buffer_min: config.pre_buffer_mins,
            post_case_buffer_min: config.post_buffer_mins,
            contract_sites: config.contract_sites,
            load: self.load_report.clone(),
        };

        info!(
            "Analyzed {} days ({} skipped) in {:?}",
            daily.len(),
            skipped_days.len(),
            start.elapsed()
        );

        Ok(AnalysisReport {
            meta,
            summary,
            daily,
            heatmap,
            heatmap_by_month,
            whatif,
            cross_validation,
            agreement,
            case_log,
            skipped_days,
        })
    }
}
