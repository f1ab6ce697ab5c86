//! Turing lexer: converts source text into tokens.
//!
//! Lexing never fails. Anything that cannot be classified becomes a
//! [`TokenKind::Unknown`] token, which the parser turns into a diagnostic.
use turing_syntax::ast::Op;
use turing_syntax::token::{Token, TokenKind};

/// Inserts `*` wherever a digit is immediately followed by a letter, so that
/// `2pi` reads as `2*pi`.
///
/// This is a single left-to-right pass: `2a3b` becomes `2*a3*b`. Text inside
/// double quotes is left untouched.
pub fn insert_implicit_mul(source: &str) -> String {
    with_implicit_mul(source).into_iter().map(|(c, _)| c).collect()
}

/// The pre-pass as `(char, inserted)` pairs, so the lexer can keep columns
/// aligned with the text the user wrote.
fn with_implicit_mul(source: &str) -> Vec<(char, bool)> {
    let mut out = Vec::with_capacity(source.len() + 4);
    let mut prev: Option<char> = None;
    let mut in_string = false;
    for c in source.chars() {
        if c == '"' {
            in_string = !in_string;
        } else if !in_string && c.is_alphabetic() && prev.map_or(false, |p| p.is_ascii_digit()) {
            out.push(('*', true));
        }
        out.push((c, false));
        prev = Some(c);
    }
    out
}

/// Convenience wrapper: `Lexer::new(source).tokenize()`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Streaming character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    /// Marks the `*`s added by the implicit multiplication pre-pass; they
    /// take up no column.
    inserted: Vec<bool>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string. The implicit
    /// multiplication pre-pass runs here.
    pub fn new(input: &str) -> Self {
        let (src, inserted) = with_implicit_mul(input).into_iter().unzip();
        Self {
            src,
            inserted,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Report positions as if the input started on `line`.
    pub fn starting_at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            let inserted = self.inserted[self.pos];
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else if !inserted {
                self.col += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if pred(c) {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        s
    }

    /// A fragment starting with a digit or `.`: a number if it parses as one,
    /// otherwise an identifier if it fits `[A-Za-z0-9_]+`.
    fn read_number(&mut self) -> TokenKind {
        let s = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if let Ok(n) = s.parse::<f64>() {
            TokenKind::Number(n)
        } else if is_identifier(&s) {
            TokenKind::Ident(s)
        } else {
            TokenKind::Unknown(s)
        }
    }

    fn read_word(&mut self) -> TokenKind {
        let s = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        match Op::from_word(&s) {
            Some(op) => TokenKind::Operator(op),
            None => TokenKind::Ident(s),
        }
    }

    fn read_string(&mut self) -> TokenKind {
        // opening quote already consumed
        let mut s = String::new();
        while let Some(c) = self.advance() {
            if c == '"' {
                return TokenKind::String(s);
            }
            s.push(c);
        }
        TokenKind::Unknown(format!("\"{}", s))
    }

    /// Consumes `second` if it comes next, choosing between a two-character
    /// and a one-character token.
    fn one_or_two(&mut self, second: char, two: TokenKind, one: TokenKind) -> TokenKind {
        self.advance();
        if self.peek() == Some(second) {
            self.advance();
            two
        } else {
            one
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let line = self.line;
            let col = self.col;
            let kind = match self.peek() {
                None => {
                    tokens.push(Token {
                        kind: TokenKind::Eof,
                        line,
                        col,
                    });
                    break;
                }
                Some('(') => self.single(TokenKind::LParen),
                Some(')') => self.single(TokenKind::RParen),
                Some('[') => self.single(TokenKind::LBracket),
                Some(']') => self.single(TokenKind::RBracket),
                Some(',') => self.single(TokenKind::Comma),
                Some('+') => self.single(TokenKind::Operator(Op::Add)),
                Some('-') => self.single(TokenKind::Operator(Op::Sub)),
                Some('*') => self.single(TokenKind::Operator(Op::Mul)),
                Some('/') => self.single(TokenKind::Operator(Op::Div)),
                Some('%') => self.single(TokenKind::Operator(Op::Mod)),
                Some('^') => self.single(TokenKind::Operator(Op::Pow)),
                Some('&') => self.single(TokenKind::Operator(Op::And)),
                Some('|') => self.single(TokenKind::Operator(Op::Or)),
                Some('=') => self.one_or_two('=', TokenKind::Operator(Op::Eq), TokenKind::Equal),
                Some('!') => self.one_or_two(
                    '=',
                    TokenKind::Operator(Op::Ne),
                    TokenKind::Unknown("!".to_string()),
                ),
                Some('<') => self.one_or_two('=', TokenKind::Operator(Op::Le), TokenKind::Operator(Op::Lt)),
                Some('>') => self.one_or_two('=', TokenKind::Operator(Op::Ge), TokenKind::Operator(Op::Gt)),
                Some('"') => {
                    self.advance();
                    self.read_string()
                }
                Some('.') if self.peek_next().map_or(false, |c| c.is_ascii_digit()) => self.read_number(),
                Some(c) if c.is_ascii_digit() => self.read_number(),
                Some(c) if c.is_ascii_alphabetic() || c == '_' => self.read_word(),
                Some(other) => self.single(TokenKind::Unknown(other.to_string())),
            };
            tokens.push(Token { kind, line, col });
        }
        tokens
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn implicit_multiplication_pre_pass() {
        assert_eq!(insert_implicit_mul("2pi"), "2*pi");
        assert_eq!(insert_implicit_mul("2a3b"), "2*a3*b");
        assert_eq!(insert_implicit_mul("x2 + 3"), "x2 + 3");
        assert_eq!(insert_implicit_mul("\"1er\" + 1x"), "\"1er\" + 1*x");
    }

    #[test]
    fn implicit_multiplication_tokenizes_like_explicit() {
        let implicit: Vec<_> = kinds("2pi");
        let explicit: Vec<_> = kinds("2*pi");
        assert_eq!(implicit, explicit);
        assert_eq!(
            implicit,
            vec![
                TokenKind::Number(2.0),
                TokenKind::Operator(Op::Mul),
                TokenKind::Ident("pi".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn multi_character_operators_are_greedy() {
        assert_eq!(
            kinds("a<=b>=c==d!=e<f>g"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Operator(Op::Le),
                TokenKind::Ident("b".to_string()),
                TokenKind::Operator(Op::Ge),
                TokenKind::Ident("c".to_string()),
                TokenKind::Operator(Op::Eq),
                TokenKind::Ident("d".to_string()),
                TokenKind::Operator(Op::Ne),
                TokenKind::Ident("e".to_string()),
                TokenKind::Operator(Op::Lt),
                TokenKind::Ident("f".to_string()),
                TokenKind::Operator(Op::Gt),
                TokenKind::Ident("g".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn word_operators_are_case_insensitive_and_canonical() {
        assert_eq!(kinds("a ET b"), kinds("a & b"));
        assert_eq!(kinds("a et b"), kinds("a & b"));
        assert_eq!(kinds("a Ou b"), kinds("a | b"));
        assert_eq!(kinds("non x")[0], TokenKind::Operator(Op::Not));
        assert_eq!(kinds("a xor b")[1], TokenKind::Operator(Op::Xor));
        // only whole words are operators
        assert_eq!(kinds("etat")[0], TokenKind::Ident("etat".to_string()));
    }

    #[test]
    fn literals() {
        assert_eq!(
            kinds("3.25 \"Bonjour 2x\" .5"),
            vec![
                TokenKind::Number(3.25),
                TokenKind::String("Bonjour 2x".to_string()),
                TokenKind::Number(0.5),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unknown_fragments() {
        assert_eq!(kinds("$")[0], TokenKind::Unknown("$".to_string()));
        assert_eq!(kinds("!")[0], TokenKind::Unknown("!".to_string()));
        assert_eq!(kinds("1.2.3")[0], TokenKind::Unknown("1.2.3".to_string()));
        assert_eq!(kinds("\"open")[0], TokenKind::Unknown("\"open".to_string()));
        assert_eq!(kinds("x = 1")[1], TokenKind::Equal);
    }

    #[test]
    fn positions() {
        let toks = Lexer::new("a +\n  b").starting_at_line(4).tokenize();
        assert_eq!((toks[0].line, toks[0].col), (4, 1));
        assert_eq!((toks[1].line, toks[1].col), (4, 3));
        assert_eq!((toks[2].line, toks[2].col), (5, 3));
    }

    #[test]
    fn implicit_multiplication_keeps_source_columns() {
        let toks = tokenize("2x + $");
        let cols: Vec<usize> = toks.iter().map(|t| t.col).collect();
        assert_eq!(cols, vec![1, 2, 2, 4, 6, 7]);
        assert_eq!(toks[4].kind, TokenKind::Unknown("$".to_string()));
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds("   "), vec![TokenKind::Eof]);
    }
}
