//! Debug session tracking.
//!
//! This module handles:
//! - Session lifecycle (start, annotate, close)
//! - JSON persistence under the session directory

pub mod store;

// Re-export main types
pub use store::{Session, SessionNote, SessionStatus, SessionStore};
