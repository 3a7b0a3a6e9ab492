//! Report statistics and summaries
//!
//! Aggregates per-day results into the summary, what-if and
//! cross-validation tables.

use crate::algorithm::concurrency::round1;
use crate::config::AnalysisConfig;
use crate::models::Case;
use crate::report::day::{DayAnalysis, is_weekday, weekday_name};
use crate::report::types::{
    AnalysisSummary, CrossValidationAgreement, CrossValidationRow, DailyAnalysisRow,
    WhatIfAggregate, WhatIfSample, truncate_chars,
};
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Maximum procedure length kept in what-if samples
pub const SAMPLE_PROCEDURE_CHARS: usize = 50;

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { round1(sum / count as f64) }
}

/// Summarize the daily table over weekdays
#[must_use]
pub fn summarize(rows: &[DailyAnalysisRow], config: &AnalysisConfig) -> AnalysisSummary {
    let weekdays: Vec<&DailyAnalysisRow> = rows.iter().filter(|row| row.is_weekday).collect();

    let whatif_uncovered = config
        .whatif_capacities
        .iter()
        .map(|&capacity| {
            let total = weekdays
                .iter()
                .map(|row| row.whatif_uncovered.get(&capacity).copied().unwrap_or(0))
                .sum();
            (capacity, total)
        })
        .collect::<BTreeMap<_, _>>();

    AnalysisSummary {
        avg_weekday_cases: mean(weekdays.iter().map(|row| row.total_cases as f64)),
        avg_weekday_committed_mins: mean(weekdays.iter().map(|row| row.committed_mins as f64)),
        avg_min_sites_needed: mean(weekdays.iter().map(|row| row.min_sites_with_buffers as f64)),
        max_min_sites_needed: weekdays
            .iter()
            .map(|row| row.min_sites_with_buffers)
            .max()
            .unwrap_or(0),
        days_needing_contract_or_more: weekdays
            .iter()
            .filter(|row| row.min_sites_with_buffers >= config.contract_sites)
            .count(),
        total_weekdays: weekdays.len(),
        whatif_uncovered,
        avg_peak_concurrent: mean(weekdays.iter().map(|row| row.peak_concurrent as f64)),
    }
}

/// Aggregate what-if results for each configured capacity
///
/// Samples are drawn in date order, at most `samples_per_day` per day and
/// `max_whatif_samples` overall.
#[must_use]
pub fn aggregate_whatif(
    days: &[DayAnalysis],
    cases_by_date: &BTreeMap<NaiveDate, Vec<Case>>,
    config: &AnalysisConfig,
) -> Vec<WhatIfAggregate> {
    config
        .whatif_capacities
        .iter()
        .map(|&capacity| {
            let mut aggregate = WhatIfAggregate {
                capacity,
                total_uncovered: 0,
                days_affected: 0,
                samples: Vec::new(),
            };

            for day in days {
                let Some(result) = day.whatif.iter().find(|r| r.capacity == capacity) else {
                    continue;
                };
                if result.uncovered.is_empty() {
                    continue;
                }
                aggregate.total_uncovered += result.uncovered_count();
                aggregate.days_affected += 1;

                let lookup: FxHashMap<&str, &Case> = cases_by_date
                    .get(&day.date)
                    .map(|cases| cases.iter().map(|c| (c.case_id.as_str(), c)).collect())
                    .unwrap_or_default();

                let room = config.max_whatif_samples.saturating_sub(aggregate.samples.len());
                aggregate.samples.extend(
                    result
                        .uncovered
                        .iter()
                        .filter_map(|id| lookup.get(id.as_str()))
                        .take(config.samples_per_day.min(room))
                        .map(|case| WhatIfSample {
                            date: day.date,
                            case_id: case.case_id.clone(),
                            procedure: truncate_chars(&case.procedure, SAMPLE_PROCEDURE_CHARS),
                            site_type: case.site_type,
                            start: case.anesthesia_start.format("%H:%M").to_string(),
                            end: case.anesthesia_end.format("%H:%M").to_string(),
                        }),
                );
            }

            aggregate
        })
        .collect()
}

/// Build cross-validation rows for every weekday in the daily table
#[must_use]
pub fn cross_validate(
    rows: &[DailyAnalysisRow],
    scheduled: &BTreeMap<NaiveDate, usize>,
) -> Vec<CrossValidationRow> {
    rows.iter()
        .filter(|row| is_weekday(row.date))
        .map(|row| CrossValidationRow {
            date: row.date,
            dow: weekday_name(row.date),
            total_cases: row.total_cases,
            algorithm_min_sites: row.min_sites_with_buffers,
            algorithm_min_sites_no_buf: row.min_sites_no_buffers,
            scheduled_sites: scheduled.get(&row.date).copied(),
        })
        .collect()
}

/// Count agreement on reaching the contracted number of sites
#[must_use]
pub fn agreement(rows: &[CrossValidationRow], contract_sites: usize) -> CrossValidationAgreement {
    let mut agreement = CrossValidationAgreement::default();
    for row in rows {
        let Some(scheduled) = row.scheduled_sites else {
            continue;
        };
        let algorithm_meets = row.algorithm_min_sites >= contract_sites;
        let schedule_meets = scheduled >= contract_sites;

        agreement.rows_with_schedule += 1;
        agreement.algorithm_at_or_above_contract += usize::from(algorithm_meets);
        agreement.scheduled_at_or_above_contract += usize::from(schedule_meets);
        agreement.both_at_or_above_contract += usize::from(algorithm_meets && schedule_meets);
    }
    agreement
}
