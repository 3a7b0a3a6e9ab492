//! Algorithm implementations for the sites-of-service analysis
//!
//! This module contains the interval partitioning engine, the
//! capacity-limited what-if simulation, the concurrency heatmap and the
//! keyword heuristics used to classify cases by site type.

pub mod capacity;
pub mod classification;
pub mod concurrency;
pub mod partitioning;

// Re-export key functions
pub use capacity::simulate_capacity;
pub use classification::classify_site;
pub use concurrency::{ConcurrencySlot, concurrency_heatmap};
pub use partitioning::{compute_minimum_resources, peak_concurrency};
