//! Domain models for the site analysis engine
//!
//! This module contains the case records consumed by the partitioning engine
//! and the result types it produces.

pub mod case;
pub mod results;
pub mod site_type;

// Re-export commonly used types
pub use case::{BufferedInterval, Buffers, Case};
pub use results::{CapacitySimulationResult, DailyResult, ResourceAssignment, SlotAssignment};
pub use site_type::SiteType;
