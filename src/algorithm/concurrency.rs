//! Time-of-day concurrency heatmap
//!
//! Samples the operating day at fixed slots and counts how many cases are
//! in progress at each slot, with and without buffers, across a set of days.

use crate::models::{Buffers, Case};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Sampling grid over the operating day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    /// First sampled hour (inclusive)
    pub start_hour: u32,
    /// Hour the grid stops at (exclusive)
    pub end_hour: u32,
    /// Minutes between samples
    pub slot_minutes: u32,
}

impl SlotWindow {
    /// Sample times from `start_hour` up to but excluding `end_hour`
    #[must_use]
    pub fn slot_times(&self) -> Vec<NaiveTime> {
        let Some(start) = NaiveTime::from_hms_opt(self.start_hour, 0, 0) else {
            return Vec::new();
        };
        if self.slot_minutes == 0 || self.end_hour <= self.start_hour {
            return Vec::new();
        }

        let total = (self.end_hour - self.start_hour) * 60;
        (0..total)
            .step_by(self.slot_minutes as usize)
            .map(|offset| start + Duration::minutes(i64::from(offset)))
            .collect()
    }
}

impl Default for SlotWindow {
    fn default() -> Self {
        Self {
            start_hour: 7,
            end_hour: 19,
            slot_minutes: 15,
        }
    }
}

/// Concurrency statistics for one time-of-day slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcurrencySlot {
    /// Slot time as `HH:MM`
    pub time: String,
    /// Average cases in progress without buffers
    pub avg_concurrent: f64,
    /// Maximum cases in progress without buffers
    pub max_concurrent: usize,
    /// Average sites committed with buffers
    pub avg_concurrent_buffered: f64,
    /// Maximum sites committed with buffers
    pub max_concurrent_buffered: usize,
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the heatmap for the given days
///
/// For each slot time `t` a case counts as buffered-concurrent when
/// `buffered_start <= t < buffered_end` and raw-concurrent when
/// `anesthesia_start <= t < anesthesia_end`. Averages are over `days` and
/// rounded to one decimal. With no days every slot is zero.
#[must_use]
pub fn concurrency_heatmap(
    days: &[(NaiveDate, &[Case])],
    buffers: &Buffers,
    window: &SlotWindow,
) -> Vec<ConcurrencySlot> {
    window
        .slot_times()
        .into_iter()
        .map(|slot_time| {
            let mut raw_counts = Vec::with_capacity(days.len());
            let mut buffered_counts = Vec::with_capacity(days.len());

            for (date, cases) in days {
                let t = date.and_time(slot_time);
                raw_counts.push(cases.iter().filter(|c| c.raw_interval().contains(t)).count());
                buffered_counts.push(
                    cases
                        .iter()
                        .filter(|c| c.buffered_interval(buffers).contains(t))
                        .count(),
                );
            }

            ConcurrencySlot {
                time: slot_time.format("%H:%M").to_string(),
                avg_concurrent: average(&raw_counts),
                max_concurrent: raw_counts.iter().copied().max().unwrap_or(0),
                avg_concurrent_buffered: average(&buffered_counts),
                max_concurrent_buffered: buffered_counts.iter().copied().max().unwrap_or(0),
            }
        })
        .collect()
}

fn average(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    round1(counts.iter().sum::<usize>() as f64 / counts.len() as f64)
}
