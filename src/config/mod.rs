//! Configuration for a site analysis run.

use crate::algorithm::concurrency::SlotWindow;
use crate::error::{Result, SiteAnalysisError};
use crate::error::util::safe_read_to_string;
use crate::models::Buffers;
use crate::models::case::{DEFAULT_POST_BUFFER_MINS, DEFAULT_PRE_BUFFER_MINS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Configuration for the analysis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Minutes a site is committed before anesthesia start
    pub pre_buffer_mins: i64,
    /// Minutes a site is committed after anesthesia end
    pub post_buffer_mins: i64,
    /// Number of contracted non-L&D sites
    pub contract_sites: usize,
    /// Site capacities to run the what-if simulation for
    pub whatif_capacities: Vec<usize>,
    /// First hour of the operating day
    pub workday_start_hour: u32,
    /// Hour the operating day ends (exclusive)
    pub workday_end_hour: u32,
    /// Minutes between heatmap samples
    pub slot_minutes: u32,
    /// Drop labor and delivery cases on load
    pub exclude_labor_delivery: bool,
    /// Dates flagged as holidays in the daily table
    pub holidays: Vec<NaiveDate>,
    /// Maximum what-if samples kept per capacity
    pub max_whatif_samples: usize,
    /// Maximum what-if samples taken from a single day
    pub samples_per_day: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pre_buffer_mins: DEFAULT_PRE_BUFFER_MINS,
            post_buffer_mins: DEFAULT_POST_BUFFER_MINS,
            contract_sites: 10,
            whatif_capacities: vec![9, 8],
            workday_start_hour: 7,
            workday_end_hour: 19,
            slot_minutes: 15,
            exclude_labor_delivery: true,
            holidays: Vec::new(),
            max_whatif_samples: 20,
            samples_per_day: 3,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "analysis configuration")?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            SiteAnalysisError::config(format!("Invalid configuration {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a runnable analysis
    pub fn validate(&self) -> Result<()> {
        self.buffers()?;
        if self.contract_sites == 0 {
            return Err(SiteAnalysisError::config("Contract sites must be at least one"));
        }
        if self.whatif_capacities.contains(&0) {
            return Err(SiteAnalysisError::config("What-if capacities must be at least one"));
        }
        if self.workday_end_hour > 24 || self.workday_start_hour >= self.workday_end_hour {
            return Err(SiteAnalysisError::config(format!(
                "Invalid workday {}:00-{}:00",
                self.workday_start_hour, self.workday_end_hour
            )));
        }
        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(SiteAnalysisError::config(format!(
                "Slot size must divide an hour, got {} minutes",
                self.slot_minutes
            )));
        }
        Ok(())
    }

    /// Buffers for the run
    pub fn buffers(&self) -> Result<Buffers> {
        Buffers::from_mins(self.pre_buffer_mins, self.post_buffer_mins)
    }

    /// Heatmap sampling grid
    #[must_use]
    pub const fn slot_window(&self) -> SlotWindow {
        SlotWindow {
            start_hour: self.workday_start_hour,
            end_hour: self.workday_end_hour,
            slot_minutes: self.slot_minutes,
        }
    }

    /// Site-minutes available per day under the contract
    #[must_use]
    pub fn capacity_mins(&self) -> i64 {
        let hours = i64::from(self.workday_end_hour.saturating_sub(self.workday_start_hour));
        i64::try_from(self.contract_sites)
            .unwrap_or(i64::MAX)
            .saturating_mul(hours)
            .saturating_mul(60)
    }

    /// Whether the date is configured as a holiday
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Configuration:")?;
        writeln!(f, "  Pre-case Buffer: {} min", self.pre_buffer_mins)?;
        writeln!(f, "  Post-case Buffer: {} min", self.post_buffer_mins)?;
        writeln!(f, "  Contract Sites: {}", self.contract_sites)?;
        writeln!(f, "  What-if Capacities: {:?}", self.whatif_capacities)?;
        writeln!(
            f,
            "  Workday: {:02}:00-{:02}:00 ({} min slots)",
            self.workday_start_hour, self.workday_end_hour, self.slot_minutes
        )?;
        writeln!(f, "  Exclude L&D: {}", self.exclude_labor_delivery)?;
        if !self.holidays.is_empty() {
            writeln!(f, "  Holidays: {}", self.holidays.len())?;
        }
        Ok(())
    }
}
