//! Report rendering.
//!
//! This module handles turning parsed traces, log analyses, and debug
//! sessions into the text reports the CLI prints. Machine-readable JSON
//! goes straight through `serde_json` at the command layer.

pub mod text;

// Re-export main functions
pub use text::{render_analysis, render_session, render_trace};
