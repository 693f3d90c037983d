//! Stack trace parsing and record schema.
//!
//! This module handles:
//! - Recognizing Python, JavaScript, Java, and Go traces in raw text
//! - Driving the per-language record state machine
//! - Defining the structured record types shared by every output path

mod grammar;
pub mod scanner;
pub mod schema;

// Re-export main types
pub use scanner::{parse_all, scan};
pub use schema::{CausedBy, Language, StackFrame, TraceRecord};
