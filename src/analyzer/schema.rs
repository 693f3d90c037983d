//! Result types for log analysis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line that contained a caller-supplied search pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternHit {
    /// 1-based line number in the analyzed text.
    pub line_number: usize,
    /// The matching line, trimmed.
    pub content: String,
}

/// Aggregated findings from a single pass over a log.
///
/// Count maps are keyed by normalized message so repeated events group
/// together; `BTreeMap` keeps serialized output deterministic. Timestamps
/// stay in encounter order, which on typical logs is chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogAnalysis {
    /// Number of lines scanned.
    pub total_lines: usize,
    /// Normalized error message -> occurrence count.
    pub errors: BTreeMap<String, usize>,
    /// Normalized warning message -> occurrence count.
    pub warnings: BTreeMap<String, usize>,
    /// Search pattern -> lines that contained it.
    pub patterns: BTreeMap<String, Vec<PatternHit>>,
    /// Timestamp substrings in encounter order.
    pub timestamps: Vec<String>,
}

impl LogAnalysis {
    /// **Public** - Total number of lines counted as errors.
    pub fn total_errors(&self) -> usize {
        self.errors.values().sum()
    }

    /// **Public** - Total number of lines counted as warnings.
    pub fn total_warnings(&self) -> usize {
        self.warnings.values().sum()
    }
}
