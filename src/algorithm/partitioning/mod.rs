//! Interval partitioning for minimum sites of service
//!
//! The minimum number of sites needed for one day equals the largest number
//! of buffered intervals overlapping at any instant. The greedy engine
//! reaches that bound by sweeping cases in start order and reusing the site
//! that frees up earliest.
//!
//! 1. Input validation (interval length, shared date, unique ids, buffers)
//! 2. The greedy min-heap engine shared with the capacity simulation
//! 3. A sweep-line peak count used for reporting and as a test oracle

pub mod engine;
pub mod sweep;
pub mod validation;

pub use engine::compute_minimum_resources;
pub use sweep::{peak_concurrency, peak_concurrency_for};
pub use validation::{validate_buffers, validate_capacity, validate_cases};
