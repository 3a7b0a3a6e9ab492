//! Capacity-limited "what-if" simulation
//!
//! Re-runs the day's greedy sweep with a fixed number of sites. A case that
//! finds every site busy when all `capacity` slots are already open is
//! turned away. Rejected cases are never retried and never fill a later
//! gap, so the result answers which specific patients would be affected by
//! contracting fewer sites.

use crate::algorithm::partitioning::engine::{prepare, run_greedy};
use crate::algorithm::partitioning::validation::{validate_buffers, validate_capacity, validate_cases};
use crate::error::Result;
use crate::models::{Buffers, CapacitySimulationResult, Case};
use log::debug;

/// Simulate one day with at most `capacity` sites
///
/// Returns the uncovered case ids in processing order and the assignment of
/// the covered cases. With `capacity` at or above the unconstrained minimum
/// no case is uncovered.
pub fn simulate_capacity(
    cases: &[Case],
    buffers: &Buffers,
    capacity: usize,
) -> Result<CapacitySimulationResult> {
    validate_buffers(buffers)?;
    validate_capacity(capacity)?;
    validate_cases(cases)?;

    let run = run_greedy(&prepare(cases, buffers), Some(capacity));
    let date = cases.first().map(|case| case.date);

    if !run.uncovered.is_empty() {
        debug!(
            "{} of {} cases on {:?} uncovered with {} sites",
            run.uncovered.len(),
            cases.len(),
            date,
            capacity
        );
    }

    Ok(CapacitySimulationResult {
        date,
        capacity,
        uncovered: run.uncovered,
        covered: run.assignment,
    })
}
