//! Structured trace data emitted by the scanners.
//!
//! These types are the parser's only output. They are built fresh on every
//! call, never mutated after being returned, and serialize directly to the
//! JSON the CLI prints with `--format json`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source ecosystem a stack trace was recognized as.
///
/// A closed set: the scanner dispatches exhaustively over these four
/// variants, so supporting a fifth format is a deliberate, visible change
/// rather than a new entry in an open table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    Java,
    Go,
}

impl Language {
    /// Fixed scan order used by [`parse_all`](crate::parser::parse_all).
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::JavaScript,
        Language::Java,
        Language::Go,
    ];

    /// Lowercase tag used in serialized output (e.g. `"python"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Java => "java",
            Language::Go => "go",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed exception or panic event with its captured call stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Ecosystem whose grammar recognized this trace
    pub language: Language,

    /// Exception/error class name, when the format carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// Human-readable error or panic message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Call-stack frames in discovery order (outermost first for formats
    /// that print them that way)
    pub stack: Vec<StackFrame>,

    /// Chained causes, outermost first; empty for formats without chaining
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caused_by: Vec<CausedBy>,
}

impl TraceRecord {
    /// Open an empty record for `language`; the scanner fills it in.
    pub(crate) fn new(language: Language) -> Self {
        Self {
            language,
            error_type: None,
            error_message: None,
            stack: Vec::new(),
            caused_by: Vec::new(),
        }
    }
}

/// A single call-stack entry: source location plus whatever identity the
/// format exposes (function, method, column, source snippet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Source file path as printed in the trace
    pub file: String,

    /// 1-based line number
    pub line: u32,

    /// Function or method name, when the frame form carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Column number (JavaScript frame forms only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    /// Trimmed source-code snippet (Python's two-line frame form only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// One `Caused by:` entry in a chained exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausedBy {
    /// Exception class of the underlying cause
    #[serde(rename = "type")]
    pub exception_type: String,

    /// Message of the underlying cause
    pub message: String,
}
