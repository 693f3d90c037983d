//! Human-readable report rendering.
//!
//! Banner-framed text blocks for trace records, log analyses, and debug
//! sessions. Every renderer returns a string; printing is left to the
//! command layer so the same reports are testable without capturing
//! stdout.

use crate::analyzer::schema::LogAnalysis;
use crate::parser::schema::TraceRecord;
use crate::session::store::Session;
use crate::utils::config::REPORT_TOP_ENTRIES;

const BANNER_WIDTH: usize = 60;

fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

fn rule() -> String {
    "-".repeat(BANNER_WIDTH)
}

/// **Public** - Renders one trace record as a framed report.
///
/// The language name is uppercased; error type and message appear only
/// when present. Frames are numbered from 1, with `N/A` standing in for
/// frames that carry no function name.
pub fn render_trace(record: &TraceRecord) -> String {
    let mut lines = Vec::new();
    lines.push(format!("\n{}", banner()));
    lines.push(format!(
        "Language: {}",
        record.language.as_str().to_uppercase()
    ));

    if let Some(error_type) = &record.error_type {
        lines.push(format!("Error Type: {error_type}"));
    }
    if let Some(error_message) = &record.error_message {
        lines.push(format!("Error Message: {error_message}"));
    }

    lines.push("\nStack Trace:".to_string());
    lines.push(rule());

    for (index, frame) in record.stack.iter().enumerate() {
        let function = frame.function.as_deref().unwrap_or("N/A");
        lines.push(format!("\n{}. {function}", index + 1));
        lines.push(format!("   File: {}:{}", frame.file, frame.line));
        if let Some(code) = &frame.code {
            lines.push(format!("   Code: {code}"));
        }
    }

    if !record.caused_by.is_empty() {
        lines.push("\nCaused By:".to_string());
        for cause in &record.caused_by {
            lines.push(format!("  - {}: {}", cause.exception_type, cause.message));
        }
    }

    lines.push(format!("{}\n", banner()));
    lines.join("\n")
}

/// **Public** - Renders a log analysis as a framed report.
///
/// Error and warning sections list the most frequent messages first,
/// capped at [`REPORT_TOP_ENTRIES`] each; messages tied on count keep
/// their alphabetical order. The time range appears only when at least
/// two timestamps were seen. Pattern hits are a machine-output concern
/// and are not rendered here.
pub fn render_analysis(analysis: &LogAnalysis) -> String {
    let mut lines = Vec::new();
    lines.push(format!("\n{}", banner()));
    lines.push("Log Analysis Report".to_string());
    lines.push(banner());
    lines.push(format!("Total Lines: {}", analysis.total_lines));
    lines.push(format!("Total Errors: {}", analysis.total_errors()));
    lines.push(format!("Total Warnings: {}", analysis.total_warnings()));

    if !analysis.errors.is_empty() {
        lines.push("\nTop Errors:".to_string());
        lines.push(rule());
        push_top_entries(&mut lines, &analysis.errors);
    }

    if !analysis.warnings.is_empty() {
        lines.push("\nTop Warnings:".to_string());
        lines.push(rule());
        push_top_entries(&mut lines, &analysis.warnings);
    }

    if analysis.timestamps.len() > 1 {
        lines.push("\nTime Range:".to_string());
        lines.push(format!("  First: {}", analysis.timestamps[0]));
        lines.push(format!(
            "  Last:  {}",
            analysis.timestamps[analysis.timestamps.len() - 1]
        ));
    }

    lines.push(format!("{}\n", banner()));
    lines.join("\n")
}

/// **Private** - Appends count-ranked `[  Nx] message` entries.
fn push_top_entries(lines: &mut Vec<String>, counts: &std::collections::BTreeMap<String, usize>) {
    let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    for (message, count) in entries.into_iter().take(REPORT_TOP_ENTRIES) {
        lines.push(format!("  [{count:3}x] {message}"));
    }
}

/// **Public** - Renders the active debug session as a framed report.
pub fn render_session(session: &Session) -> String {
    let mut lines = Vec::new();
    lines.push(format!("\n{}", banner()));
    lines.push(format!("Debug Session: {}", session.id));
    lines.push(banner());
    lines.push(format!("Description: {}", session.description));
    lines.push(format!("Started: {}", session.start_time));
    lines.push(format!("Status: {}", session.status));

    if !session.notes.is_empty() {
        lines.push("\nNotes:".to_string());
        lines.push(rule());
        for (index, note) in session.notes.iter().enumerate() {
            lines.push(format!("\n{}. [{}]", index + 1, note.timestamp));
            lines.push(format!("   {}", note.content));
        }
    }

    lines.push(format!("{}\n", banner()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{CausedBy, Language, StackFrame};
    use crate::session::store::{SessionNote, SessionStatus};

    fn sample_record() -> TraceRecord {
        TraceRecord {
            language: Language::Python,
            error_type: Some("ValueError".to_string()),
            error_message: Some("boom".to_string()),
            stack: vec![StackFrame {
                file: "app.py".to_string(),
                line: 10,
                function: Some("main".to_string()),
                column: None,
                code: Some("run()".to_string()),
            }],
            caused_by: vec![],
        }
    }

    #[test]
    fn test_trace_report_layout() {
        let report = render_trace(&sample_record());
        assert!(report.contains("Language: PYTHON"));
        assert!(report.contains("Error Type: ValueError"));
        assert!(report.contains("Error Message: boom"));
        assert!(report.contains("\n1. main"));
        assert!(report.contains("   File: app.py:10"));
        assert!(report.contains("   Code: run()"));
        assert!(report.starts_with("\n============"));
        assert!(report.ends_with("============\n"));
    }

    #[test]
    fn test_trace_report_omits_absent_fields() {
        let mut record = sample_record();
        record.error_type = None;
        record.stack[0].code = None;
        record.stack[0].function = None;

        let report = render_trace(&record);
        assert!(!report.contains("Error Type:"));
        assert!(!report.contains("   Code:"));
        assert!(report.contains("\n1. N/A"));
    }

    #[test]
    fn test_trace_report_lists_causes() {
        let mut record = sample_record();
        record.caused_by.push(CausedBy {
            exception_type: "java.io.IOException".to_string(),
            message: "stream closed".to_string(),
        });

        let report = render_trace(&record);
        assert!(report.contains("\nCaused By:"));
        assert!(report.contains("  - java.io.IOException: stream closed"));
    }

    #[test]
    fn test_analysis_report_ranks_by_count() {
        let mut analysis = LogAnalysis {
            total_lines: 7,
            ..Default::default()
        };
        analysis.errors.insert("rare failure".to_string(), 1);
        analysis.errors.insert("common failure".to_string(), 5);

        let report = render_analysis(&analysis);
        assert!(report.contains("Total Errors: 6"));
        let common = report.find("common failure").unwrap();
        let rare = report.find("rare failure").unwrap();
        assert!(common < rare, "higher counts should be listed first");
        assert!(report.contains("[  5x] common failure"));
    }

    #[test]
    fn test_analysis_report_caps_entries() {
        let mut analysis = LogAnalysis::default();
        for i in 0..15 {
            analysis.errors.insert(format!("error variant {i:02}"), 1);
        }

        let report = render_analysis(&analysis);
        let shown = report.matches("error variant").count();
        assert_eq!(shown, REPORT_TOP_ENTRIES);
    }

    #[test]
    fn test_analysis_time_range_needs_two_timestamps() {
        let mut analysis = LogAnalysis::default();
        analysis.timestamps.push("2024-03-01 10:00:00".to_string());
        assert!(!render_analysis(&analysis).contains("Time Range:"));

        analysis.timestamps.push("2024-03-01 10:05:00".to_string());
        let report = render_analysis(&analysis);
        assert!(report.contains("Time Range:"));
        assert!(report.contains("  First: 2024-03-01 10:00:00"));
        assert!(report.contains("  Last:  2024-03-01 10:05:00"));
    }

    #[test]
    fn test_session_report_layout() {
        let session = Session {
            id: "20240301_153042".to_string(),
            description: "api returns 500".to_string(),
            start_time: "2024-03-01T15:30:42+00:00".to_string(),
            notes: vec![SessionNote {
                timestamp: "2024-03-01T15:45:00+00:00".to_string(),
                content: "only fails for uploads over 10MB".to_string(),
            }],
            status: SessionStatus::Active,
            end_time: None,
            solution: None,
        };

        let report = render_session(&session);
        assert!(report.contains("Debug Session: 20240301_153042"));
        assert!(report.contains("Description: api returns 500"));
        assert!(report.contains("Status: active"));
        assert!(report.contains("\n1. [2024-03-01T15:45:00+00:00]"));
        assert!(report.contains("   only fails for uploads over 10MB"));
    }
}
