//! Single-pass log scanning.
//!
//! This module handles:
//! - Counting error and warning lines by severity token
//! - Normalizing matched lines so repeated events group under one key
//! - Collecting timestamp substrings and custom-pattern hits
//!
//! Severity matching is a plain substring search anywhere in the line, so
//! a token inside a larger word still counts. Normalization strips the
//! volatile parts of a line (timestamp, severity word, bracketed logger
//! name) but makes no attempt to template out embedded ids or durations.

use super::schema::{LogAnalysis, PatternHit};
use crate::utils::config::MAX_MESSAGE_LEN;
use regex::Regex;
use std::sync::OnceLock;

static ERROR_TOKENS: OnceLock<Regex> = OnceLock::new();
static WARNING_TOKENS: OnceLock<Regex> = OnceLock::new();
static TIMESTAMP_TOKEN: OnceLock<Regex> = OnceLock::new();
static TIMESTAMP_PREFIX: OnceLock<Regex> = OnceLock::new();
static SEVERITY_WORDS: OnceLock<Regex> = OnceLock::new();
static LOGGER_NAME: OnceLock<Regex> = OnceLock::new();

fn error_tokens() -> &'static Regex {
    ERROR_TOKENS.get_or_init(|| {
        Regex::new(r"(?i)(?:ERROR|CRITICAL|FATAL)").expect("error token pattern compiles")
    })
}

fn warning_tokens() -> &'static Regex {
    WARNING_TOKENS
        .get_or_init(|| Regex::new(r"(?i)WARN(?:ING)?").expect("warning token pattern compiles"))
}

/// ISO-8601-like timestamp, date and time separated by `T` or whitespace.
fn timestamp_token() -> &'static Regex {
    TIMESTAMP_TOKEN.get_or_init(|| {
        Regex::new(r"\d{4}-\d{2}-\d{2}[T\s]\d{2}:\d{2}:\d{2}")
            .expect("timestamp pattern compiles")
    })
}

/// Timestamp plus any trailing fractional seconds, removed during
/// normalization.
fn timestamp_prefix() -> &'static Regex {
    TIMESTAMP_PREFIX.get_or_init(|| {
        Regex::new(r"\d{4}-\d{2}-\d{2}[T\s]\d{2}:\d{2}:\d{2}[.,\d]*")
            .expect("timestamp prefix pattern compiles")
    })
}

fn severity_words() -> &'static Regex {
    SEVERITY_WORDS.get_or_init(|| {
        Regex::new(r"(?i)\b(?:ERROR|WARN(?:ING)?|INFO|DEBUG|CRITICAL|FATAL)\b")
            .expect("severity word pattern compiles")
    })
}

/// Bracketed dotted logger name, e.g. `[app.db.pool]`.
fn logger_name() -> &'static Regex {
    LOGGER_NAME
        .get_or_init(|| Regex::new(r"\[[\w\.]+\]").expect("logger name pattern compiles"))
}

/// **Public** - Analyzes log text in a single forward pass.
///
/// Every line is tested independently against the error and warning token
/// sets, so one line can count toward both. Matched lines are normalized
/// before counting; see [`normalize_message`]. When `pattern` is given,
/// lines containing it as a literal substring are recorded with their
/// 1-based line number.
///
/// # Arguments
/// * `text` - Log content to scan
/// * `pattern` - Optional literal substring to track per line
pub fn analyze(text: &str, pattern: Option<&str>) -> LogAnalysis {
    let mut analysis = LogAnalysis::default();

    for (index, line) in text.lines().enumerate() {
        analysis.total_lines += 1;

        if error_tokens().is_match(line) {
            let message = normalize_message(line);
            *analysis.errors.entry(message).or_insert(0) += 1;
        }
        if warning_tokens().is_match(line) {
            let message = normalize_message(line);
            *analysis.warnings.entry(message).or_insert(0) += 1;
        }
        if let Some(found) = timestamp_token().find(line) {
            analysis.timestamps.push(found.as_str().to_string());
        }
        if let Some(pattern) = pattern {
            if line.contains(pattern) {
                analysis
                    .patterns
                    .entry(pattern.to_string())
                    .or_default()
                    .push(PatternHit {
                        line_number: index + 1,
                        content: line.trim().to_string(),
                    });
            }
        }
    }

    analysis
}

/// **Private** - Reduces a matched line to its grouping key.
///
/// Strips timestamps (with fractional seconds), severity words, and
/// bracketed logger names, trims leading and trailing separator
/// characters, and caps the result at [`MAX_MESSAGE_LEN`] characters.
fn normalize_message(line: &str) -> String {
    let message = timestamp_prefix().replace_all(line, "");
    let message = severity_words().replace_all(&message, "");
    let message = logger_name().replace_all(&message, "");
    let message = message.trim_matches(|c: char| matches!(c, ' ' | ':' | '|' | '-'));
    truncate_chars(message, MAX_MESSAGE_LEN).to_string()
}

/// Character-based truncation; never splits inside a multibyte sequence.
fn truncate_chars(message: &str, limit: usize) -> &str {
    match message.char_indices().nth(limit) {
        Some((boundary, _)) => &message[..boundary],
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts_errors_and_warnings_independently() {
        let text = "\
2024-03-01 10:00:00 INFO [app.boot] starting
2024-03-01 10:00:01 ERROR [app.db] connection refused
2024-03-01 10:00:02 WARNING [app.db] retrying connection
2024-03-01 10:00:03 ERROR [app.db] connection refused
";
        let analysis = analyze(text, None);
        assert_eq!(analysis.total_lines, 4);
        assert_eq!(analysis.total_errors(), 2);
        assert_eq!(analysis.total_warnings(), 1);
        assert_eq!(analysis.errors.get("connection refused"), Some(&2));
        assert_eq!(analysis.warnings.get("retrying connection"), Some(&1));
    }

    #[test]
    fn test_same_event_groups_under_one_key() {
        let text = "\
2024-03-01 10:00:01.123 ERROR [app.db] connection refused
2024-03-01T23:59:59,456 error connection refused
";
        let analysis = analyze(text, None);
        assert_eq!(analysis.errors.len(), 1);
        assert_eq!(analysis.errors.get("connection refused"), Some(&2));
    }

    #[test]
    fn test_line_can_match_both_severities() {
        let analysis = analyze("ERROR after WARN threshold crossed\n", None);
        assert_eq!(analysis.total_errors(), 1);
        assert_eq!(analysis.total_warnings(), 1);
    }

    #[test]
    fn test_severity_matches_inside_larger_words() {
        // Substring semantics: "errors" still counts the line.
        let analysis = analyze("3 errors were ignored\n", None);
        assert_eq!(analysis.total_errors(), 1);
    }

    #[test]
    fn test_timestamps_keep_encounter_order() {
        let text = "\
2024-03-01 10:00:02 INFO late event logged first
2024-03-01 10:00:01 INFO early event logged second
";
        let analysis = analyze(text, None);
        assert_eq!(
            analysis.timestamps,
            vec!["2024-03-01 10:00:02", "2024-03-01 10:00:01"]
        );
    }

    #[test]
    fn test_pattern_hits_record_one_based_lines() {
        let text = "first line\n  payment failed: card declined  \nlast line\n";
        let analysis = analyze(text, Some("payment"));
        let hits = analysis.patterns.get("payment").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line_number, 2);
        assert_eq!(hits[0].content, "payment failed: card declined");
    }

    #[test]
    fn test_normalize_strips_volatile_parts() {
        assert_eq!(
            normalize_message("2024-03-01 10:00:01.123 ERROR [app.db.pool] :-- timeout | waiting"),
            "timeout | waiting"
        );
    }

    #[test]
    fn test_normalize_caps_message_length() {
        let line = format!("ERROR {}", "x".repeat(500));
        assert_eq!(normalize_message(&line).chars().count(), MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_empty_input() {
        let analysis = analyze("", None);
        assert_eq!(analysis, LogAnalysis::default());
    }
}
