//! Validation functions for the partitioning engine
//!
//! This module checks input before any site is assigned. The engine fails
//! fast and never corrects input silently.

use crate::error::{Result, SiteAnalysisError};
use crate::models::{Buffers, Case};
use rustc_hash::FxHashSet;

/// Validate one day's case list
///
/// Every case must have `anesthesia_end > anesthesia_start`, all cases must
/// share the same date and case ids must be unique.
pub fn validate_cases(cases: &[Case]) -> Result<()> {
    let Some(first) = cases.first() else {
        return Ok(());
    };

    let mut seen = FxHashSet::default();
    for case in cases {
        case.validate()?;

        if case.date != first.date {
            return Err(SiteAnalysisError::validation(format!(
                "Case {} is dated {} but the batch is for {}",
                case.case_id, case.date, first.date
            )));
        }

        if !seen.insert(case.case_id.as_str()) {
            return Err(SiteAnalysisError::validation(format!(
                "Duplicate case id: {}",
                case.case_id
            )));
        }
    }

    Ok(())
}

/// Validate the buffers used for a run
pub fn validate_buffers(buffers: &Buffers) -> Result<()> {
    buffers.validate()
}

/// Validate a what-if site capacity
pub fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(SiteAnalysisError::validation(
            "Capacity must be at least one site",
        ));
    }
    Ok(())
}
