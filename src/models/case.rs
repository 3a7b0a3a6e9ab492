//! Anesthesia case model
//!
//! A `Case` is one anesthesia encounter on a single calendar date. The
//! partitioning engine works on its buffered interval: the recorded
//! anesthesia time widened by a pre-case and post-case site commitment.

use crate::error::{Result, SiteAnalysisError};
use crate::models::site_type::SiteType;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Default pre-case buffer in minutes
pub const DEFAULT_PRE_BUFFER_MINS: i64 = 30;

/// Default post-case buffer in minutes
pub const DEFAULT_POST_BUFFER_MINS: i64 = 15;

/// Largest accepted pre- or post-case buffer. A case never spans more than
/// a day, so a longer buffer cannot change any result.
pub const MAX_BUFFER_MINS: i64 = 24 * 60;

/// Representation of a single anesthesia encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Unique identifier, stable across a dataset
    pub case_id: String,
    /// Calendar date the case occurs on
    pub date: NaiveDate,
    /// Recorded anesthesia start
    pub anesthesia_start: NaiveDateTime,
    /// Recorded anesthesia end
    pub anesthesia_end: NaiveDateTime,
    /// Site category
    #[serde(default)]
    pub site_type: SiteType,
    /// Procedure description (de-identified)
    #[serde(default)]
    pub procedure: String,
    /// Anesthesia record form title
    #[serde(default)]
    pub form_title: String,
}

impl Case {
    /// Create a new case with an `OR` site type and no procedure text
    #[must_use]
    pub fn new(
        case_id: impl Into<String>,
        date: NaiveDate,
        anesthesia_start: NaiveDateTime,
        anesthesia_end: NaiveDateTime,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            date,
            anesthesia_start,
            anesthesia_end,
            site_type: SiteType::default(),
            procedure: String::new(),
            form_title: String::new(),
        }
    }

    /// Set the site type
    #[must_use]
    pub fn with_site_type(mut self, site_type: SiteType) -> Self {
        self.site_type = site_type;
        self
    }

    /// Set the procedure and form title
    #[must_use]
    pub fn with_procedure(mut self, procedure: impl Into<String>, form_title: impl Into<String>) -> Self {
        self.procedure = procedure.into();
        self.form_title = form_title.into();
        self
    }

    /// Check that the anesthesia interval has positive length
    pub fn validate(&self) -> Result<()> {
        if self.anesthesia_end <= self.anesthesia_start {
            return Err(SiteAnalysisError::validation(format!(
                "Case {}: anesthesia end {} is not after start {}",
                self.case_id, self.anesthesia_end, self.anesthesia_start
            )));
        }
        Ok(())
    }

    /// The recorded anesthesia interval without buffers
    #[must_use]
    pub const fn raw_interval(&self) -> BufferedInterval {
        BufferedInterval {
            start: self.anesthesia_start,
            end: self.anesthesia_end,
        }
    }

    /// The interval the case occupies a site for, given the buffers
    ///
    /// Bounds saturate at the representable range for buffers that skipped
    /// validation; the engine rejects those before getting here.
    #[must_use]
    pub fn buffered_interval(&self, buffers: &Buffers) -> BufferedInterval {
        BufferedInterval {
            start: self
                .anesthesia_start
                .checked_sub_signed(buffers.pre)
                .unwrap_or(NaiveDateTime::MIN),
            end: self
                .anesthesia_end
                .checked_add_signed(buffers.post)
                .unwrap_or(NaiveDateTime::MAX),
        }
    }

    /// Recorded anesthesia duration, rounded to the nearest minute
    #[must_use]
    pub fn duration_mins(&self) -> i64 {
        let seconds = (self.anesthesia_end - self.anesthesia_start).num_seconds();
        (seconds as f64 / 60.0).round() as i64
    }
}

/// Half-open time interval `[start, end)` occupied by a case on a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferedInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BufferedInterval {
    /// Whether two intervals need distinct sites. Touching at a boundary
    /// (`self.end == other.start`) is not an overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the instant `t` falls inside `[start, end)`
    #[must_use]
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t < self.end
    }

    /// Length in whole minutes
    #[must_use]
    pub fn duration_mins(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Pre-case and post-case site commitment added around each case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buffers {
    /// Time a site is committed before anesthesia start
    pub pre: Duration,
    /// Time a site is committed after anesthesia end
    pub post: Duration,
}

impl Buffers {
    /// Create buffers, rejecting negative or oversized durations
    pub fn new(pre: Duration, post: Duration) -> Result<Self> {
        let buffers = Self { pre, post };
        buffers.validate()?;
        Ok(buffers)
    }

    /// Create buffers from minute counts
    pub fn from_mins(pre_mins: i64, post_mins: i64) -> Result<Self> {
        let to_duration = |mins: i64, which: &str| {
            Some(mins)
                .filter(|mins| (0..=MAX_BUFFER_MINS).contains(mins))
                .and_then(Duration::try_minutes)
                .ok_or_else(|| {
                    SiteAnalysisError::validation(format!(
                        "{which} buffer must be between 0 and {MAX_BUFFER_MINS} minutes, got {mins}"
                    ))
                })
        };
        Self::new(to_duration(pre_mins, "Pre-case")?, to_duration(post_mins, "Post-case")?)
    }

    /// No buffering: the raw anesthesia interval is used
    #[must_use]
    pub fn none() -> Self {
        Self {
            pre: Duration::zero(),
            post: Duration::zero(),
        }
    }

    /// Check that both buffers lie within `0..=MAX_BUFFER_MINS` minutes
    pub fn validate(&self) -> Result<()> {
        let max = Duration::minutes(MAX_BUFFER_MINS);
        let in_range = |buffer: Duration| buffer >= Duration::zero() && buffer <= max;
        if !in_range(self.pre) || !in_range(self.post) {
            return Err(SiteAnalysisError::validation(format!(
                "Buffers must be between 0 and {MAX_BUFFER_MINS} minutes (pre {} min, post {} min)",
                self.pre.num_minutes(),
                self.post.num_minutes()
            )));
        }
        Ok(())
    }

    /// Whether both buffers are zero
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.pre.is_zero() && self.post.is_zero()
    }
}

impl Default for Buffers {
    fn default() -> Self {
        Self {
            pre: Duration::minutes(DEFAULT_PRE_BUFFER_MINS),
            post: Duration::minutes(DEFAULT_POST_BUFFER_MINS),
        }
    }
}
