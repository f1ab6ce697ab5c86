//! Parse diagnostics for the Turing toolchain.
//!
//! Parsing never aborts: the lexer and both parsers record a [`Diagnostic`]
//! for every token they cannot place and keep going, so callers always get a
//! (possibly partial) tree together with the full list of problems. A caller
//! must check that list before trusting the tree.
//!
//! # Examples
//!
//! ```rust
//! use turing_syntax::Diagnostic;
//!
//! let located = Diagnostic::with_span("Expected ')'", 3, 14);
//! assert_eq!(located.to_string(), "Expected ')' at 3:14");
//!
//! let bare = Diagnostic::new("Missing 'FIN'");
//! assert_eq!(bare.to_string(), "Missing 'FIN'");
//! ```

use std::fmt;

use crate::token::Token;

/// A recoverable problem found while lexing or parsing.
///
/// # Fields
///
/// - `msg`: Human-readable description
/// - `line`: Optional 1-based line number in the source
/// - `col`: Optional 1-based column number in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable message
    pub msg: String,

    /// Optional line number in source (1-based)
    pub line: Option<usize>,

    /// Optional column number in source (1-based)
    pub col: Option<usize>,
}

impl Diagnostic {
    /// Creates a diagnostic without location information.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
            col: None,
        }
    }

    /// Creates a diagnostic pointing at a 1-based line and column.
    pub fn with_span(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            msg: msg.into(),
            line: Some(line),
            col: Some(col),
        }
    }

    /// Creates a diagnostic located at `token`.
    pub fn at_token(msg: impl Into<String>, token: &Token) -> Self {
        Self::with_span(msg, token.line, token.col)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(l), Some(c)) = (self.line, self.col) {
            write!(f, "{} at {}:{}", self.msg, l, c)
        } else {
            write!(f, "{}", self.msg)
        }
    }
}

impl From<String> for Diagnostic {
    fn from(s: String) -> Self {
        Diagnostic::new(s)
    }
}

impl From<&str> for Diagnostic {
    fn from(s: &str) -> Self {
        Diagnostic::new(s)
    }
}
