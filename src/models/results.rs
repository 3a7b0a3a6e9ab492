//! Result types produced by the partitioning engine

use crate::models::case::BufferedInterval;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One case placed on one site slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAssignment {
    /// Identifier of the assigned case
    pub case_id: String,
    /// 0-based site slot index, stable only within one computation run
    pub slot: usize,
    /// Buffered interval the case holds the slot for
    pub interval: BufferedInterval,
}

/// Mapping of cases to site slots
///
/// Entries are kept in processing order (buffered start ascending, ties in
/// input order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAssignment {
    entries: Vec<SlotAssignment>,
}

impl ResourceAssignment {
    pub(crate) const fn from_entries(entries: Vec<SlotAssignment>) -> Self {
        Self { entries }
    }

    /// Number of distinct slots used (`max(slot) + 1`, zero when empty)
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.slot + 1)
            .max()
            .unwrap_or(0)
    }

    /// Slot assigned to a case, if the case is part of this assignment
    #[must_use]
    pub fn slot_of(&self, case_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.case_id == case_id)
            .map(|entry| entry.slot)
    }

    /// All entries placed on the given slot, in processing order
    #[must_use]
    pub fn cases_in_slot(&self, slot: usize) -> Vec<&SlotAssignment> {
        self.entries.iter().filter(|entry| entry.slot == slot).collect()
    }

    /// Pairs of case ids sharing a slot with overlapping intervals.
    /// Empty for every assignment the engine produces.
    #[must_use]
    pub fn conflicts(&self) -> Vec<(String, String)> {
        let mut conflicts = Vec::new();
        for (i, a) in self.entries.iter().enumerate() {
            for b in &self.entries[i + 1..] {
                if a.slot == b.slot && a.interval.overlaps(&b.interval) {
                    conflicts.push((a.case_id.clone(), b.case_id.clone()));
                }
            }
        }
        conflicts
    }

    /// Iterate over the entries
    pub fn iter(&self) -> impl Iterator<Item = &SlotAssignment> {
        self.entries.iter()
    }

    /// Number of assigned cases
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no case is assigned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Minimum site counts for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResult {
    /// Date of the cases, `None` for an empty case list
    pub date: Option<NaiveDate>,
    /// Minimum sites with buffered intervals
    pub minimum_resources: usize,
    /// Minimum sites with the raw anesthesia intervals
    pub minimum_resources_raw: usize,
    /// Number of cases on the day
    pub case_count: usize,
    /// Caller-defined utilization ratio, never set by the engine
    pub utilization_pct: Option<f64>,
}

impl DailyResult {
    /// Attach a utilization figure computed by the caller
    #[must_use]
    pub const fn with_utilization(mut self, utilization_pct: f64) -> Self {
        self.utilization_pct = Some(utilization_pct);
        self
    }
}

/// Outcome of running the day under a fixed number of sites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySimulationResult {
    /// Date of the cases, `None` for an empty case list
    pub date: Option<NaiveDate>,
    /// Number of sites available
    pub capacity: usize,
    /// Cases that found no free site, in processing order
    pub uncovered: Vec<String>,
    /// Assignment of the cases that were served
    pub covered: ResourceAssignment,
}

impl CapacitySimulationResult {
    /// Number of cases that could not be served
    #[must_use]
    pub fn uncovered_count(&self) -> usize {
        self.uncovered.len()
    }

    /// Number of cases that were served
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.covered.len()
    }

    /// Whether the given case was turned away
    #[must_use]
    pub fn is_uncovered(&self, case_id: &str) -> bool {
        self.uncovered.iter().any(|id| id == case_id)
    }
}
