//! A Rust library for computing the minimum number of concurrent anesthesia
//! sites of service from daily case logs, with capacity-limited what-if
//! simulation and report generation.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::AnalysisConfig;
pub use error::{Result, SiteAnalysisError};
pub use models::{
    BufferedInterval, Buffers, CapacitySimulationResult, Case, DailyResult, ResourceAssignment,
    SiteType, SlotAssignment,
};

// Engine
pub use algorithm::{classify_site, compute_minimum_resources, peak_concurrency, simulate_capacity};

// Loading and reporting
pub use loader::{LoadReport, load_cases, load_scheduled_sites};
pub use report::{AnalysisReport, ReportBuilder, analyze_day, group_by_date};
