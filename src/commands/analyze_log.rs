//! Analyze-log command implementation.
//!
//! The analyze-log command:
//! 1. Reads the log file through the input boundary
//! 2. Scans it once for severities, timestamps, and the optional pattern
//! 3. Prints the framed report, or the full analysis as JSON
//!
//! Pattern hits only appear in JSON output; the text report summarizes
//! severities and the observed time range.

use crate::analyzer::analyze;
use crate::commands::OutputFormat;
use crate::input::read_text;
use crate::output::render_analysis;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the analyze-log command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeLogArgs {
    /// Log file to analyze
    pub file: PathBuf,

    /// Literal substring to track per line (optional)
    pub pattern: Option<String>,

    /// Output format
    pub format: OutputFormat,
}

/// Execute the analyze-log command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * File missing, unreadable, or not UTF-8
pub fn execute_analyze_log(args: AnalyzeLogArgs) -> Result<()> {
    info!("Analyzing log file: {}", args.file.display());

    let text = read_text(&args.file).context("Failed to read log file")?;
    let analysis = analyze(&text, args.pattern.as_deref());

    debug!(
        "Scanned {} line(s): {} error(s), {} warning(s)",
        analysis.total_lines,
        analysis.total_errors(),
        analysis.total_warnings()
    );

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&analysis)
                .context("Failed to serialize analysis")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            println!("{}", render_analysis(&analysis));
        }
    }

    Ok(())
}
