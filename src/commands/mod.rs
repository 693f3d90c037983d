//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components and own all printing;
//! everything below this layer returns data.

use clap::ValueEnum;

pub mod analyze_log;
pub mod parse_trace;
pub mod session;

// Re-export main command functions
pub use analyze_log::{execute_analyze_log, AnalyzeLogArgs};
pub use parse_trace::{execute_parse_trace, ParseTraceArgs};
pub use session::{execute_session, SessionAction};

/// Report format shared by the file-reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable framed report
    Text,
    /// Pretty-printed JSON
    Json,
}
