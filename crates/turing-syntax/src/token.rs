//! Token definitions produced by the Turing lexer.
//!
//! Tokens are the flat sequence the expression and program parsers work on.
//! Operators are already canonical here: `ET` and `&` both arrive as
//! [`Op::And`], `OU` and `|` both arrive as [`Op::Or`], so no spelling
//! information survives past the lexer.
//!
//! # Examples
//!
//! ```rust
//! use turing_syntax::{Op, Token, TokenKind};
//!
//! let number = Token { kind: TokenKind::Number(2.0), line: 1, col: 1 };
//! let times = Token { kind: TokenKind::Operator(Op::Mul), line: 1, col: 2 };
//! let name = Token { kind: TokenKind::Ident("pi".to_string()), line: 1, col: 3 };
//! assert_eq!(times.kind.describe(), "'*'");
//! # let _ = (number, name);
//! ```

use std::fmt;

use crate::ast::Op;

/// Token types that can be produced by the Turing lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Literals ===
    /// An identifier (`[A-Za-z0-9_]+`) that is not a word operator.
    Ident(String),

    /// A floating-point literal.
    Number(f64),

    /// A quoted string; the contents are taken verbatim, without escapes.
    String(String),

    // === Operators ===
    /// Any expression operator, already reduced to its canonical form.
    Operator(Op),

    /// A lone `=`, only meaningful as the assignment sign of a statement.
    Equal,

    // === Punctuation ===
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,

    /// A fragment the lexer could not classify. The parser reports it.
    Unknown(String),

    /// End-of-input marker.
    Eof,
}

impl TokenKind {
    /// Short human-readable rendering used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier '{}'", name),
            TokenKind::Number(n) => format!("number {}", crate::printer::format_number(*n)),
            TokenKind::String(s) => format!("string \"{}\"", s),
            TokenKind::Operator(op) => format!("'{}'", op),
            TokenKind::Equal => "'='".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::Unknown(s) => format!("unknown token '{}'", s),
            TokenKind::Eof => "end of input".to_string(),
        }
    }

    /// True when this token is an identifier equal to `word`, ignoring case.
    ///
    /// Statement keywords (`SI`, `POUR`, `FIN`, ...) are plain identifiers at
    /// the token level.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, TokenKind::Ident(name) if name.eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A token with its source location (1-based line and column).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type and semantic content of this token
    pub kind: TokenKind,

    /// Line number in the source (1-based)
    pub line: usize,

    /// Column number in the source (1-based)
    pub col: usize,
}
