//! Log analysis: severity counting, message grouping, pattern search.
//!
//! This module handles:
//! - Scanning log text for error and warning lines
//! - Grouping repeated events under a normalized message key
//! - Tracking timestamps and caller-supplied search patterns

pub mod log_scan;
pub mod schema;

// Re-export main types
pub use log_scan::analyze;
pub use schema::{LogAnalysis, PatternHit};
