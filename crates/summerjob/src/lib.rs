//! Planning toolkit for SummerJob volunteer events: per-day assignment
//! issue detection, greedy plan and ride generation, and worker roster
//! import.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
