//! Parse-trace command implementation.
//!
//! The parse-trace command:
//! 1. Reads the input file through the input boundary
//! 2. Runs every trace grammar over the text
//! 3. Prints framed text reports, or the records as a JSON array

use crate::commands::OutputFormat;
use crate::input::read_text;
use crate::output::render_trace;
use crate::parser::parse_all;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the parse-trace command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ParseTraceArgs {
    /// File containing stack trace text
    pub file: PathBuf,

    /// Output format
    pub format: OutputFormat,
}

/// Execute the parse-trace command
///
/// **Public** - main entry point called from main.rs
///
/// A file without any recognizable trace is not an error: text mode
/// prints a notice, JSON mode prints an empty array, and the exit code
/// stays zero either way.
///
/// # Errors
/// * File missing, unreadable, or not UTF-8
pub fn execute_parse_trace(args: ParseTraceArgs) -> Result<()> {
    info!("Parsing stack traces from: {}", args.file.display());

    let text = read_text(&args.file).context("Failed to read trace file")?;
    let records = parse_all(&text);

    debug!("Found {} trace record(s)", records.len());

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&records)
                .context("Failed to serialize trace records")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No stack traces found in file.");
            }
            for record in &records {
                println!("{}", render_trace(record));
            }
        }
    }

    Ok(())
}
