//! Configuration and constants for the CLI.

/// Longest normalized log message kept as a grouping key, in characters
pub const MAX_MESSAGE_LEN: usize = 100;

/// Most entries listed per severity section in text reports
pub const REPORT_TOP_ENTRIES: usize = 10;

// Session persistence layout. The store lives in a hidden directory under
// the working directory; one file is the mutable active slot, closed
// sessions are archived beside it under their id.
pub const SESSION_DIR: &str = ".debug_sessions";
pub const CURRENT_SESSION_FILE: &str = "current_session.json";

/// chrono format for session ids, e.g. `20240301_153042`
pub const SESSION_ID_FORMAT: &str = "%Y%m%d_%H%M%S";
