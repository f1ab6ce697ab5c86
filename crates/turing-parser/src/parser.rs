//! Recursive-descent expression parser.
//!
//! Precedence, lowest first, every level left-associative:
//!
//! ```text
//! or             := xor ( '|' xor )*
//! xor            := and ( 'XOR' and )*
//! and            := equality ( '&' equality )*
//! equality       := additive ( ('=='|'!='|'<'|'<='|'>'|'>=') additive )*
//! additive       := multiplicative ( ('+'|'-') multiplicative )*
//! multiplicative := unary ( ('^'|'*'|'/'|'%') unary )*
//! unary          := ('-'|'NON') unary | postfix
//! postfix        := term ( '(' args ')' | '[' expr ']' )*
//! term           := number | string | '(' expr ')' | '[' items ']' | identifier
//! ```
//!
//! `^` sits on the multiplicative level, so `2^3*4` is `(2^3)*4`.

use turing_syntax::ast::{Expr, Op};
use turing_syntax::error::Diagnostic;
use turing_syntax::token::{Token, TokenKind};

const OR_OPS: &[Op] = &[Op::Or];
const XOR_OPS: &[Op] = &[Op::Xor];
const AND_OPS: &[Op] = &[Op::And];
const EQUALITY_OPS: &[Op] = &[Op::Eq, Op::Ne, Op::Lt, Op::Le, Op::Gt, Op::Ge];
const ADDITIVE_OPS: &[Op] = &[Op::Add, Op::Sub];
const MULTIPLICATIVE_OPS: &[Op] = &[Op::Pow, Op::Mul, Op::Div, Op::Mod];
const UNARY_OPS: &[Op] = &[Op::Sub, Op::Not];

/// Deepest nesting of parentheses, brackets and prefix operators accepted
/// in one expression.
pub const MAX_NESTING: usize = 64;

/// Expression parser over a token vector. Problems are collected as
/// diagnostics; parsing itself never fails.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    /// Set once nesting overflows; the rest of the input is abandoned.
    too_deep: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let (line, col) = tokens.last().map_or((1, 1), |t| (t.line, t.col + 1));
            tokens.push(Token {
                kind: TokenKind::Eof,
                line,
                col,
            });
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            too_deep: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parses the whole token stream as one expression.
    ///
    /// An empty stream yields `None` with no diagnostics; any token left over
    /// after the expression is reported.
    pub fn parse(&mut self) -> Option<Expr> {
        if self.at_end() {
            return None;
        }
        let expr = self.parse_expr();
        if !self.at_end() {
            let tok = self.peek().clone();
            self.report(&tok);
        }
        expr
    }

    /// Parses one expression starting at the current token.
    pub fn parse_expr(&mut self) -> Option<Expr> {
        self.nested(Self::parse_or)
    }

    fn nested(&mut self, inner: fn(&mut Self) -> Option<Expr>) -> Option<Expr> {
        if self.too_deep {
            return None;
        }
        if self.depth >= MAX_NESTING {
            let diag = Diagnostic::at_token(
                format!("Expression nested more than {} levels deep", MAX_NESTING),
                self.peek(),
            );
            self.diagnostics.push(diag);
            self.too_deep = true;
            self.pos = self.tokens.len() - 1;
            return None;
        }
        self.depth += 1;
        let expr = inner(self);
        self.depth -= 1;
        expr
    }

    fn peek(&self) -> &Token {
        // Eof is always last and never consumed
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if !self.at_end() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn accept(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn accept_op(&mut self, ops: &[Op]) -> Option<Op> {
        match self.peek().kind {
            TokenKind::Operator(op) if ops.contains(&op) => {
                self.advance();
                Some(op)
            }
            _ => None,
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> bool {
        if self.accept(kind) {
            return true;
        }
        let tok = self.peek();
        let diag = Diagnostic::at_token(
            format!("Expected {} but found {}", kind.describe(), tok.kind.describe()),
            tok,
        );
        if !self.too_deep {
            self.diagnostics.push(diag);
        }
        false
    }

    fn report(&mut self, tok: &Token) {
        if self.too_deep {
            return;
        }
        let msg = match &tok.kind {
            TokenKind::Unknown(text) => format!("Unknown token '{}'", text),
            TokenKind::Eof => "Unexpected end of input".to_string(),
            other => format!("Unexpected {}", other.describe()),
        };
        self.diagnostics.push(Diagnostic::at_token(msg, tok));
    }

    fn binary_level(&mut self, ops: &[Op], next: fn(&mut Self) -> Option<Expr>) -> Option<Expr> {
        let mut expr = next(self)?;
        while let Some(op) = self.accept_op(ops) {
            match next(self) {
                Some(right) => expr = Expr::binary(expr, op, right),
                // keep what we have; the operand's problem is already reported
                None => return Some(expr),
            }
        }
        Some(expr)
    }

    fn parse_or(&mut self) -> Option<Expr> {
        self.binary_level(OR_OPS, Self::parse_xor)
    }

    fn parse_xor(&mut self) -> Option<Expr> {
        self.binary_level(XOR_OPS, Self::parse_and)
    }

    fn parse_and(&mut self) -> Option<Expr> {
        self.binary_level(AND_OPS, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        self.binary_level(EQUALITY_OPS, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        self.binary_level(ADDITIVE_OPS, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        self.binary_level(MULTIPLICATIVE_OPS, Self::parse_unary)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        if let Some(op) = self.accept_op(UNARY_OPS) {
            let operand = self.nested(Self::parse_unary)?;
            return Some(Expr::unary(op, operand));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_term()?;
        loop {
            match self.peek().kind {
                TokenKind::LParen => match expr {
                    Expr::Identifier(callee) => {
                        self.advance();
                        let args = self.parse_items(&TokenKind::RParen);
                        expr = Expr::Call { callee, args };
                    }
                    other => {
                        expr = other;
                        break;
                    }
                },
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr();
                    self.expect(&TokenKind::RBracket);
                    match index {
                        Some(index) => expr = Expr::index(expr, index),
                        None => break,
                    }
                }
                _ => break,
            }
        }
        Some(expr)
    }

    /// Comma-separated expressions up to `close`; the opening delimiter is
    /// already consumed. A trailing comma is tolerated.
    fn parse_items(&mut self, close: &TokenKind) -> Vec<Expr> {
        let mut items = Vec::new();
        while !self.check(close) && !self.at_end() {
            if let Some(item) = self.parse_expr() {
                items.push(item);
            }
            if !self.accept(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close);
        items
    }

    fn parse_term(&mut self) -> Option<Expr> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Number(n) => {
                self.advance();
                Some(Expr::Number(n))
            }
            TokenKind::String(s) => {
                self.advance();
                Some(Expr::String(s))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Some(Expr::Identifier(name))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr();
                self.expect(&TokenKind::RParen);
                inner
            }
            TokenKind::LBracket => {
                self.advance();
                Some(Expr::List(self.parse_items(&TokenKind::RBracket)))
            }
            TokenKind::Eof => {
                self.report(&tok);
                None
            }
            _ => {
                self.advance();
                self.report(&tok);
                None
            }
        }
    }
}
