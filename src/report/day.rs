//! Per-day analysis
//!
//! Runs the partitioning engine, the sweep-line peak count and every
//! configured what-if capacity over one day's cases.

use crate::algorithm::concurrency::round1;
use crate::algorithm::partitioning::peak_concurrency_for;
use crate::algorithm::{compute_minimum_resources, simulate_capacity};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{Buffers, CapacitySimulationResult, Case, DailyResult, ResourceAssignment};
use crate::report::types::DailyAnalysisRow;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Everything computed for one day
#[derive(Debug, Clone)]
pub struct DayAnalysis {
    pub date: NaiveDate,
    pub daily: DailyResult,
    pub assignment: ResourceAssignment,
    pub peak_concurrent: usize,
    pub committed_mins: i64,
    pub whatif: Vec<CapacitySimulationResult>,
}

/// Whether the date falls Monday to Friday
#[must_use]
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Short weekday name
#[must_use]
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Analyze one day's cases
///
/// Utilization is buffered committed minutes over the contracted
/// site-minutes of the configured workday.
pub fn analyze_day(
    date: NaiveDate,
    cases: &[Case],
    buffers: &Buffers,
    config: &AnalysisConfig,
) -> Result<DayAnalysis> {
    let (daily, assignment) = compute_minimum_resources(cases, buffers)?;

    let whatif = config
        .whatif_capacities
        .iter()
        .map(|&capacity| simulate_capacity(cases, buffers, capacity))
        .collect::<Result<Vec<_>>>()?;

    let committed_mins: i64 = cases
        .iter()
        .map(|case| case.buffered_interval(buffers).duration_mins())
        .sum();
    let capacity_mins = config.capacity_mins();
    let utilization = if capacity_mins > 0 {
        round1(committed_mins as f64 / capacity_mins as f64 * 100.0)
    } else {
        0.0
    };

    Ok(DayAnalysis {
        date,
        daily: daily.with_utilization(utilization),
        assignment,
        peak_concurrent: peak_concurrency_for(cases, buffers),
        committed_mins,
        whatif,
    })
}

impl DayAnalysis {
    /// Build the daily table row
    #[must_use]
    pub fn to_row(&self, config: &AnalysisConfig) -> DailyAnalysisRow {
        DailyAnalysisRow {
            date: self.date,
            dow: weekday_name(self.date),
            is_weekday: is_weekday(self.date),
            is_holiday: config.is_holiday(self.date),
            total_cases: self.daily.case_count,
            min_sites_with_buffers: self.daily.minimum_resources,
            min_sites_no_buffers: self.daily.minimum_resources_raw,
            committed_mins: self.committed_mins,
            capacity_mins: config.capacity_mins(),
            utilization_pct: self.daily.utilization_pct.unwrap_or(0.0),
            peak_concurrent: self.peak_concurrent,
            whatif_uncovered: self
                .whatif
                .iter()
                .map(|result| (result.capacity, result.uncovered_count()))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}
