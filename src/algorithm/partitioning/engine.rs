//! Greedy min-heap interval partitioning
//!
//! Cases are visited in order of buffered start. A min-heap holds
//! `(buffered_end, slot)` for every open site. A case reuses the site that
//! frees up earliest when that site is free at or before the case's buffered
//! start (`end <= start`, so back-to-back cases share a site). Otherwise a
//! new slot is opened, unless a capacity cap is reached, in which case the
//! case is recorded as uncovered and holds no site.

use crate::algorithm::partitioning::validation::{validate_buffers, validate_cases};
use crate::error::Result;
use crate::models::{BufferedInterval, Buffers, Case, DailyResult, ResourceAssignment, SlotAssignment};
use chrono::NaiveDateTime;
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A case paired with its buffered interval, ready for the sweep
#[derive(Debug, Clone, Copy)]
pub(crate) struct PreparedCase<'a> {
    pub case: &'a Case,
    pub interval: BufferedInterval,
}

/// Output of one greedy pass
#[derive(Debug, Clone, Default)]
pub(crate) struct GreedyRun {
    pub assignment: ResourceAssignment,
    pub uncovered: Vec<String>,
    pub slots_opened: usize,
}

/// Compute buffered intervals and sort by buffered start.
///
/// `sort_by_key` is stable, so cases starting together keep input order and
/// slot numbering is reproducible.
pub(crate) fn prepare<'a>(cases: &'a [Case], buffers: &Buffers) -> Vec<PreparedCase<'a>> {
    let mut prepared: Vec<PreparedCase<'a>> = cases
        .iter()
        .map(|case| PreparedCase {
            case,
            interval: case.buffered_interval(buffers),
        })
        .collect();
    prepared.sort_by_key(|p| p.interval.start);
    prepared
}

/// Run the greedy sweep over prepared cases, optionally capped at
/// `capacity` slots.
pub(crate) fn run_greedy(prepared: &[PreparedCase<'_>], capacity: Option<usize>) -> GreedyRun {
    let mut open: BinaryHeap<Reverse<(NaiveDateTime, usize)>> =
        BinaryHeap::with_capacity(capacity.unwrap_or(prepared.len()).min(prepared.len()));
    let mut entries = Vec::with_capacity(prepared.len());
    let mut uncovered = Vec::new();
    let mut next_index = 0usize;

    for p in prepared {
        let earliest_free = open.peek().map(|Reverse((end, slot))| (*end, *slot));

        let slot = match earliest_free {
            Some((end, slot)) if end <= p.interval.start => {
                open.pop();
                slot
            }
            _ if capacity.is_none_or(|cap| next_index < cap) => {
                let slot = next_index;
                next_index += 1;
                slot
            }
            _ => {
                uncovered.push(p.case.case_id.clone());
                continue;
            }
        };

        open.push(Reverse((p.interval.end, slot)));
        entries.push(SlotAssignment {
            case_id: p.case.case_id.clone(),
            slot,
            interval: p.interval,
        });
    }

    GreedyRun {
        assignment: ResourceAssignment::from_entries(entries),
        uncovered,
        slots_opened: next_index,
    }
}

/// Compute the minimum number of sites for one day's cases
///
/// Returns the day's counts (buffered and raw) together with the buffered
/// assignment that witnesses the buffered count. An empty case list yields
/// zero sites and an empty assignment.
///
/// # Preconditions
/// All cases share one date; the caller partitions by day. Mixed dates are
/// rejected with a validation error rather than handled.
pub fn compute_minimum_resources(
    cases: &[Case],
    buffers: &Buffers,
) -> Result<(DailyResult, ResourceAssignment)> {
    validate_buffers(buffers)?;
    validate_cases(cases)?;

    let buffered = run_greedy(&prepare(cases, buffers), None);
    let minimum_resources_raw = if buffers.is_none() {
        buffered.slots_opened
    } else {
        run_greedy(&prepare(cases, &Buffers::none()), None).slots_opened
    };

    let date = cases.first().map(|case| case.date);
    debug!(
        "Partitioned {} cases on {:?} into {} sites ({} without buffers)",
        cases.len(),
        date,
        buffered.slots_opened,
        minimum_resources_raw
    );

    let daily = DailyResult {
        date,
        minimum_resources: buffered.slots_opened,
        minimum_resources_raw,
        case_count: cases.len(),
        utilization_pct: None,
    };

    Ok((daily, buffered.assignment))
}
