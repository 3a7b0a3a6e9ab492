//! Utility functions shared by the loader, report builder and CLI

pub mod logging;
