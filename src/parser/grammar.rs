//! Fixed line-recognition rules for the four supported trace formats.
//!
//! Each grammar is a small set of anchored regular expressions: a start
//! marker, frame-line forms in priority order, and optionally a trailer
//! (Python's closing `Type: message` line), a chain pattern (Java's
//! `Caused by:`), and a transparent header (Go's goroutine line). The
//! patterns are compiled once per process and shared read-only, so
//! concurrent scans never contend on them.
//!
//! The rule sets are deliberately closed: [`Language`] has exactly four
//! variants and [`grammar_for`] matches exhaustively. There is no registry
//! to extend at runtime.

use super::schema::Language;
use regex::Regex;
use std::sync::OnceLock;

/// How a grammar's start line opens a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartKind {
    /// Bare marker; error type and message arrive with the trailer (Python).
    Marker,
    /// `<Type>: <message>` captured when the record opens (JavaScript, Java).
    TypedHeader,
    /// Message-only header, no type (Go's `panic: <message>`).
    MessageHeader,
}

/// What a kept record must contain to be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EmitPolicy {
    /// The trailer line must have been seen (Python).
    RequireTrailer,
    /// At least one frame must have been captured (JavaScript, Go).
    RequireFrame,
    /// Always emit, even a bare start line (Java).
    Always,
}

/// One frame-line form. Variants differ in capture layout and in how many
/// input lines a match consumes.
#[derive(Debug)]
pub(crate) enum FrameRule {
    /// Two-line form: `File "<path>", line <n>, in <fn>` followed by a
    /// source line consumed verbatim as the frame's snippet (Python).
    DeclarationWithSnippet(Regex),
    /// Single line `at <fn> (<file>:<line>:<col>)` (JavaScript, tried first).
    FunctionFileLineCol(Regex),
    /// Single line `at <file>:<line>:<col>` (JavaScript fallback).
    FileLineCol(Regex),
    /// Single line `at <method>(<file>:<line>)` (Java).
    MethodFileLine(Regex),
    /// Two-line form: a call-site line followed by an indented
    /// `<file>:<line>` location line (Go). A call-site line whose follower
    /// is not a location line is consumed alone without producing a frame.
    CallThenLocation { call: Regex, location: Regex },
}

/// Compiled rule set for one trace format.
#[derive(Debug)]
pub(crate) struct Grammar {
    /// Line that opens a record.
    pub start: Regex,
    /// How the start line populates the record.
    pub start_kind: StartKind,
    /// Frame forms in priority order.
    pub frames: Vec<FrameRule>,
    /// Closing `<Type>: <message>` line, tested once when the frame run ends.
    pub trailer: Option<Regex>,
    /// `Caused by:` style chain line, tested once when the frame run ends.
    pub chain: Option<Regex>,
    /// Header lines skipped inside the frame run without ending it.
    pub transparent: Option<Regex>,
    /// Skip non-matching lines until the first frame is captured. Real Go
    /// panics always put a blank line (and often a `[signal ...]` line)
    /// between `panic:` and the goroutine header; without this tolerance
    /// the >= 1 frame rule would drop every one of them.
    pub tolerate_leading_noise: bool,
    /// Completeness rule applied when no trailer/chain resolves the record.
    pub policy: EmitPolicy,
}

/// Compile a static grammar pattern.
fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("static grammar pattern is valid and should always compile")
}

static PYTHON_GRAMMAR: OnceLock<Grammar> = OnceLock::new();
static JAVASCRIPT_GRAMMAR: OnceLock<Grammar> = OnceLock::new();
static JAVA_GRAMMAR: OnceLock<Grammar> = OnceLock::new();
static GO_GRAMMAR: OnceLock<Grammar> = OnceLock::new();

/// Rules for CPython tracebacks:
///
/// ```text
/// Traceback (most recent call last):
///   File "app.py", line 10, in main
///     run()
/// ValueError: boom
/// ```
fn python_grammar() -> &'static Grammar {
    PYTHON_GRAMMAR.get_or_init(|| Grammar {
        start: pattern(r"^Traceback \(most recent call last\):"),
        start_kind: StartKind::Marker,
        frames: vec![FrameRule::DeclarationWithSnippet(pattern(
            r#"^\s+File "([^"]+)", line (\d+), in (.+)"#,
        ))],
        trailer: Some(pattern(r"^(\w+(?:Error|Exception|Warning)): (.+)")),
        chain: None,
        transparent: None,
        tolerate_leading_noise: false,
        policy: EmitPolicy::RequireTrailer,
    })
}

/// Rules for V8/Node stack errors:
///
/// ```text
/// TypeError: cannot read properties of undefined
///     at handle (server.js:42:13)
///     at internal/process:7:9
/// ```
fn javascript_grammar() -> &'static Grammar {
    JAVASCRIPT_GRAMMAR.get_or_init(|| Grammar {
        start: pattern(r"^(\w+Error): (.+)"),
        start_kind: StartKind::TypedHeader,
        frames: vec![
            FrameRule::FunctionFileLineCol(pattern(r"^\s+at (.+) \(([^:]+):(\d+):(\d+)\)")),
            FrameRule::FileLineCol(pattern(r"^\s+at ([^:]+):(\d+):(\d+)")),
        ],
        trailer: None,
        chain: None,
        transparent: None,
        tolerate_leading_noise: false,
        policy: EmitPolicy::RequireFrame,
    })
}

/// Rules for JVM exceptions with cause chains:
///
/// ```text
/// java.lang.RuntimeException: request failed
///     at com.acme.Handler.run(Handler.java:42)
/// Caused by: java.io.IOException: stream closed
///     at com.acme.Stream.read(Stream.java:17)
/// ```
fn java_grammar() -> &'static Grammar {
    JAVA_GRAMMAR.get_or_init(|| Grammar {
        start: pattern(r"^([\w\.]+(?:Exception|Error)): (.+)"),
        start_kind: StartKind::TypedHeader,
        frames: vec![FrameRule::MethodFileLine(pattern(
            r"^\s+at ([\w\.$]+)\(([^:]+):(\d+)\)",
        ))],
        trailer: None,
        chain: Some(pattern(r"^Caused by: ([\w\.]+(?:Exception|Error)): (.+)")),
        transparent: None,
        tolerate_leading_noise: false,
        policy: EmitPolicy::Always,
    })
}

/// Rules for Go panic traces:
///
/// ```text
/// panic: runtime error: index out of range
///
/// goroutine 1 [running]:
/// main.crash(0x0)
///     /app/main.go:10 +0x39
/// ```
fn go_grammar() -> &'static Grammar {
    GO_GRAMMAR.get_or_init(|| Grammar {
        start: pattern(r"^panic: (.+)"),
        start_kind: StartKind::MessageHeader,
        frames: vec![FrameRule::CallThenLocation {
            call: pattern(r"^(.+)\(.*\)"),
            location: pattern(r"^\s+([^:]+):(\d+)"),
        }],
        trailer: None,
        chain: None,
        transparent: Some(pattern(r"^goroutine \d+ \[.+\]:")),
        tolerate_leading_noise: true,
        policy: EmitPolicy::RequireFrame,
    })
}

/// Resolve the compiled grammar for a language. Exhaustive by construction.
pub(crate) fn grammar_for(language: Language) -> &'static Grammar {
    match language {
        Language::Python => python_grammar(),
        Language::JavaScript => javascript_grammar(),
        Language::Java => java_grammar(),
        Language::Go => go_grammar(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_grammars_compile() {
        for language in Language::ALL {
            let grammar = grammar_for(language);
            assert!(!grammar.frames.is_empty(), "{language} has no frame rules");
        }
    }

    #[test]
    fn test_python_start_and_trailer() {
        let grammar = grammar_for(Language::Python);
        assert!(grammar.start.is_match("Traceback (most recent call last):"));
        assert!(!grammar.start.is_match("traceback (most recent call last):"));

        let trailer = grammar.trailer.as_ref().unwrap();
        let caps = trailer.captures("ValueError: boom").unwrap();
        assert_eq!(&caps[1], "ValueError");
        assert_eq!(&caps[2], "boom");
        // The type must be a single word ending in Error/Exception/Warning.
        assert!(trailer.captures("ValueErr: boom").is_none());
    }

    #[test]
    fn test_python_frame_declaration() {
        let grammar = grammar_for(Language::Python);
        let FrameRule::DeclarationWithSnippet(decl) = &grammar.frames[0] else {
            panic!("python frame rule changed shape");
        };
        let caps = decl
            .captures("  File \"/srv/app.py\", line 12, in handle_request")
            .unwrap();
        assert_eq!(&caps[1], "/srv/app.py");
        assert_eq!(&caps[2], "12");
        assert_eq!(&caps[3], "handle_request");
        // Leading whitespace is required.
        assert!(decl.captures("File \"x.py\", line 1, in f").is_none());
    }

    #[test]
    fn test_javascript_frame_priority_forms() {
        let grammar = grammar_for(Language::JavaScript);
        let FrameRule::FunctionFileLineCol(full) = &grammar.frames[0] else {
            panic!("javascript frame priority changed");
        };
        let caps = full.captures("    at handle (server.js:42:13)").unwrap();
        assert_eq!(&caps[1], "handle");
        assert_eq!(&caps[2], "server.js");
        assert_eq!(&caps[3], "42");
        assert_eq!(&caps[4], "13");

        let FrameRule::FileLineCol(simple) = &grammar.frames[1] else {
            panic!("javascript fallback frame changed");
        };
        let caps = simple.captures("    at server.js:42:13").unwrap();
        assert_eq!(&caps[1], "server.js");
    }

    #[test]
    fn test_java_chain_line() {
        let grammar = grammar_for(Language::Java);
        let chain = grammar.chain.as_ref().unwrap();
        let caps = chain
            .captures("Caused by: java.io.IOException: stream closed")
            .unwrap();
        assert_eq!(&caps[1], "java.io.IOException");
        assert_eq!(&caps[2], "stream closed");
    }

    #[test]
    fn test_go_transparent_goroutine_header() {
        let grammar = grammar_for(Language::Go);
        let transparent = grammar.transparent.as_ref().unwrap();
        assert!(transparent.is_match("goroutine 1 [running]:"));
        assert!(transparent.is_match("goroutine 42 [chan receive]:"));
        assert!(!transparent.is_match("goroutine leak detected"));
    }

    #[test]
    fn test_go_call_site_greedy_capture() {
        let grammar = grammar_for(Language::Go);
        let FrameRule::CallThenLocation { call, .. } = &grammar.frames[0] else {
            panic!("go frame rule changed shape");
        };
        // Greedy capture pins the opening paren to the last one on the line,
        // so receiver parens stay inside the function name.
        let caps = call.captures("main.(*Server).run(0xc000010, 0x1)").unwrap();
        assert_eq!(&caps[1], "main.(*Server).run");
    }
}
