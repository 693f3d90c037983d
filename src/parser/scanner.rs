//! Line-oriented scanner that turns raw text into structured trace records.
//!
//! This module handles:
//! - Locating a language's start marker anywhere in free-form text
//! - Driving the record state machine (frame run, trailer, cause chain)
//! - Enforcing per-language completeness before a record is emitted
//! - The fixed-order multi-language sweep exposed as [`parse_all`]
//!
//! Incomplete candidates (a Python header with no closing error line, a
//! JavaScript header with no frames) are dropped silently; surrounding
//! prose never produces partial records.

use super::grammar::{grammar_for, EmitPolicy, FrameRule, Grammar, StartKind};
use super::schema::{CausedBy, Language, StackFrame, TraceRecord};
use log::debug;
use regex::Captures;

/// Outcome of testing one frame rule at the cursor.
enum FrameStep {
    /// A frame was captured; advance by the given number of lines.
    Frame(StackFrame, usize),
    /// Lines were consumed without producing a frame (a Go call-site line
    /// whose follower is not a location line).
    Skipped(usize),
    /// The rule does not apply at this position.
    NoMatch,
}

/// **Public** - Scans text for every trace record of a single language.
///
/// The scanner walks the input line by line. Lines outside a record are
/// ignored. When the language's start marker matches, a record opens and
/// the grammar's frame rules consume lines until a trailer, a cause-chain
/// line, a non-matching line, or end of input closes it. The line that
/// closes a record is consumed with it; scanning resumes on the next line,
/// so a trailer can never double as the next record's start.
///
/// # Arguments
/// * `text` - Raw text that may contain zero or more traces
/// * `language` - Which grammar to apply
///
/// # Returns
/// Emitted records in input order. Candidates that fail the language's
/// completeness rule are dropped.
pub fn scan(text: &str, language: Language) -> Vec<TraceRecord> {
    let grammar = grammar_for(language);
    let lines: Vec<&str> = text.lines().collect();
    let mut records = Vec::new();

    let mut index = 0;
    while index < lines.len() {
        let Some(caps) = grammar.start.captures(lines[index]) else {
            index += 1;
            continue;
        };
        let opened = open_record(language, grammar, &caps);
        let (kept, resume) = scan_record(grammar, &lines, index + 1, opened);
        if let Some(record) = kept {
            records.push(record);
        }
        index = resume;
    }

    records
}

/// **Public** - Runs every supported grammar over the text in a fixed
/// order: Python, JavaScript, Java, Go.
///
/// Each grammar scans the full input independently, so text that satisfies
/// two grammars (a `TypeError:` header is both a JavaScript and a Java
/// start) is reported once per grammar. Callers that want a single
/// interpretation should scan with a concrete [`Language`] instead.
pub fn parse_all(text: &str) -> Vec<TraceRecord> {
    Language::ALL
        .into_iter()
        .flat_map(|language| scan(text, language))
        .collect()
}

/// **Private** - Builds the initial record from the matched start line.
fn open_record(language: Language, grammar: &Grammar, caps: &Captures) -> TraceRecord {
    let mut record = TraceRecord::new(language);
    match grammar.start_kind {
        StartKind::Marker => {}
        StartKind::TypedHeader => {
            record.error_type = Some(caps[1].to_string());
            record.error_message = Some(caps[2].to_string());
        }
        StartKind::MessageHeader => {
            record.error_message = Some(caps[1].to_string());
        }
    }
    record
}

/// **Private** - Drives an open record to completion.
///
/// Returns the finalized record (or `None` when dropped) together with the
/// index scanning should resume from. The returned index is always past
/// the line that ended the record.
fn scan_record(
    grammar: &Grammar,
    lines: &[&str],
    mut cursor: usize,
    mut record: TraceRecord,
) -> (Option<TraceRecord>, usize) {
    loop {
        cursor = collect_frames(grammar, lines, cursor, &mut record);
        if cursor >= lines.len() {
            return (finalize(grammar, record), cursor);
        }

        let line = lines[cursor];
        if let Some(trailer) = &grammar.trailer {
            if let Some(caps) = trailer.captures(line) {
                record.error_type = Some(caps[1].to_string());
                record.error_message = Some(caps[2].to_string());
                return (finalize(grammar, record), cursor + 1);
            }
        }
        if let Some(chain) = &grammar.chain {
            if let Some(caps) = chain.captures(line) {
                record.caused_by.push(CausedBy {
                    exception_type: caps[1].to_string(),
                    message: caps[2].to_string(),
                });
                // Cause frames continue the same stack.
                cursor += 1;
                continue;
            }
        }
        // Any other line ends the record and is consumed with it.
        return (finalize(grammar, record), cursor + 1);
    }
}

/// **Private** - Consumes a run of frame lines starting at the cursor.
///
/// Transparent headers (Go's goroutine line) are skipped without ending
/// the run. Grammars with leading-noise tolerance also skip non-matching
/// lines until the first frame lands. Returns the index of the first line
/// the run could not consume.
fn collect_frames(
    grammar: &Grammar,
    lines: &[&str],
    mut cursor: usize,
    record: &mut TraceRecord,
) -> usize {
    'lines: while cursor < lines.len() {
        if let Some(transparent) = &grammar.transparent {
            if transparent.is_match(lines[cursor]) {
                cursor += 1;
                continue;
            }
        }
        for rule in &grammar.frames {
            match match_frame(rule, lines, cursor) {
                FrameStep::Frame(frame, consumed) => {
                    record.stack.push(frame);
                    cursor += consumed;
                    continue 'lines;
                }
                FrameStep::Skipped(consumed) => {
                    cursor += consumed;
                    continue 'lines;
                }
                FrameStep::NoMatch => {}
            }
        }
        if grammar.tolerate_leading_noise && record.stack.is_empty() {
            cursor += 1;
            continue;
        }
        break;
    }
    cursor
}

/// **Private** - Tests one frame rule at the cursor.
///
/// A captured line number below 1, or one too large for `u32`, makes the
/// rule a non-match rather than producing a bogus frame.
fn match_frame(rule: &FrameRule, lines: &[&str], cursor: usize) -> FrameStep {
    let line = lines[cursor];
    match rule {
        FrameRule::DeclarationWithSnippet(decl) => {
            let Some(caps) = decl.captures(line) else {
                return FrameStep::NoMatch;
            };
            let Some(line_number) = parse_line_number(&caps[2]) else {
                return FrameStep::NoMatch;
            };
            let mut frame = StackFrame {
                file: caps[1].to_string(),
                line: line_number,
                function: Some(caps[3].to_string()),
                column: None,
                code: None,
            };
            // The line after the declaration is the source snippet and is
            // consumed with it whenever one exists.
            match lines.get(cursor + 1) {
                Some(snippet) => {
                    let snippet = snippet.trim();
                    if !snippet.is_empty() {
                        frame.code = Some(snippet.to_string());
                    }
                    FrameStep::Frame(frame, 2)
                }
                None => FrameStep::Frame(frame, 1),
            }
        }
        FrameRule::FunctionFileLineCol(form) => {
            let Some(caps) = form.captures(line) else {
                return FrameStep::NoMatch;
            };
            let Some(line_number) = parse_line_number(&caps[3]) else {
                return FrameStep::NoMatch;
            };
            FrameStep::Frame(
                StackFrame {
                    file: caps[2].to_string(),
                    line: line_number,
                    function: Some(caps[1].to_string()),
                    column: caps[4].parse().ok(),
                    code: None,
                },
                1,
            )
        }
        FrameRule::FileLineCol(form) => {
            let Some(caps) = form.captures(line) else {
                return FrameStep::NoMatch;
            };
            let Some(line_number) = parse_line_number(&caps[2]) else {
                return FrameStep::NoMatch;
            };
            FrameStep::Frame(
                StackFrame {
                    file: caps[1].to_string(),
                    line: line_number,
                    function: None,
                    column: caps[3].parse().ok(),
                    code: None,
                },
                1,
            )
        }
        FrameRule::MethodFileLine(form) => {
            let Some(caps) = form.captures(line) else {
                return FrameStep::NoMatch;
            };
            let Some(line_number) = parse_line_number(&caps[3]) else {
                return FrameStep::NoMatch;
            };
            FrameStep::Frame(
                StackFrame {
                    file: caps[2].to_string(),
                    line: line_number,
                    function: Some(caps[1].to_string()),
                    column: None,
                    code: None,
                },
                1,
            )
        }
        FrameRule::CallThenLocation { call, location } => {
            let Some(call_caps) = call.captures(line) else {
                return FrameStep::NoMatch;
            };
            // A call-site line is only a frame when the next line carries
            // the file and line number; otherwise it is consumed alone.
            let Some(next) = lines.get(cursor + 1) else {
                return FrameStep::Skipped(1);
            };
            let Some(loc_caps) = location.captures(next) else {
                return FrameStep::Skipped(1);
            };
            let Some(line_number) = parse_line_number(&loc_caps[2]) else {
                return FrameStep::Skipped(1);
            };
            FrameStep::Frame(
                StackFrame {
                    file: loc_caps[1].to_string(),
                    line: line_number,
                    function: Some(call_caps[1].to_string()),
                    column: None,
                    code: None,
                },
                2,
            )
        }
    }
}

/// **Private** - Applies the grammar's completeness rule to a closed record.
fn finalize(grammar: &Grammar, record: TraceRecord) -> Option<TraceRecord> {
    let complete = match grammar.policy {
        EmitPolicy::RequireTrailer => record.error_type.is_some(),
        EmitPolicy::RequireFrame => !record.stack.is_empty(),
        EmitPolicy::Always => true,
    };
    if complete {
        Some(record)
    } else {
        debug!(
            "Dropping incomplete {} trace candidate with {} frame(s)",
            record.language,
            record.stack.len()
        );
        None
    }
}

fn parse_line_number(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|&n| n >= 1)
}
