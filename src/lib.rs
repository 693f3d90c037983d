//! Trace Detective
//!
//! Multi-language stack trace parsing, log analysis, and debug
//! session tracking.
//!
//! This crate provides the core implementation for the
//! `trace-detective` CLI tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install trace-detective
//! trace-detective --help
//! ```
//!
//! Library users start with [`parser::parse_all`] for trace extraction
//! and [`analyzer::analyze`] for log scanning; both take plain text and
//! return owned result structures.

pub mod analyzer;
pub mod commands;
pub mod input;
pub mod output;
pub mod parser;
pub mod session;
pub mod utils;
