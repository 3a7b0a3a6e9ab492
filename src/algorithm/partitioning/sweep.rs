//! Sweep-line peak concurrency
//!
//! Counts the largest number of intervals open at one instant. At equal
//! timestamps ends are processed before starts, matching the engine's rule
//! that back-to-back intervals may share a site.

use crate::models::{BufferedInterval, Buffers, Case};
use itertools::Itertools;

/// Largest number of intervals overlapping at any single instant
#[must_use]
pub fn peak_concurrency<I>(intervals: I) -> usize
where
    I: IntoIterator<Item = BufferedInterval>,
{
    let events = intervals
        .into_iter()
        .flat_map(|interval| [(interval.start, 1i64), (interval.end, -1i64)])
        // (time, delta) ordering puts -1 before +1 at the same instant
        .sorted_unstable()
        .collect_vec();

    let mut open = 0i64;
    let mut peak = 0i64;
    for (_, delta) in events {
        open += delta;
        peak = peak.max(open);
    }

    usize::try_from(peak).unwrap_or(0)
}

/// Peak concurrency of a case list under the given buffers
#[must_use]
pub fn peak_concurrency_for(cases: &[Case], buffers: &Buffers) -> usize {
    peak_concurrency(cases.iter().map(|case| case.buffered_interval(buffers)))
}
