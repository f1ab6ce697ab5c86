//! Line-oriented program parser.
//!
//! One statement per line, French keywords matched case-insensitively:
//!
//! ```text
//! x = expr                     AFFICHER expr           LIRE x
//! SI expr [ALORS] .. [SINON ..] FIN
//! TANT QUE expr [FAIRE] .. FIN
//! POUR i DE a A b [FAIRE] .. FIN
//! FONCTION f(a, b) .. FIN      RETOURNER [expr]
//! SORTIR                       CONTINUER               f(args)
//! ```
//!
//! Blank lines and lines starting with `#` or `//` are skipped. Like the
//! expression parser, this never fails: problems become diagnostics and the
//! offending line is dropped, while block structure is still tracked so one
//! bad line does not derail the rest of the program.

use turing_lexer::Lexer;
use turing_syntax::ast::{Expr, Function, Stmt};
use turing_syntax::error::Diagnostic;
use turing_syntax::token::{Token, TokenKind};

use crate::parser::Parser;

/// Parses a whole program.
pub fn parse_program(source: &str) -> (Vec<Stmt>, Vec<Diagnostic>) {
    let mut parser = ProgramParser::new(source);
    let program = parser.parse_program();
    (program, parser.diagnostics)
}

/// Net number of open blocks in `source`: block openers minus `FIN` lines.
///
/// Used by interactive front-ends to decide whether more input is needed.
pub fn block_depth(source: &str) -> isize {
    let mut depth = 0isize;
    for line in significant_lines(source) {
        match line.tokens.first().map(|t| &t.kind) {
            Some(k) if is_block_opener(k) => depth += 1,
            Some(k) if k.is_word("FIN") => depth -= 1,
            _ => {}
        }
    }
    depth
}

fn is_block_opener(kind: &TokenKind) -> bool {
    ["SI", "TANT", "POUR", "FONCTION"].iter().any(|w| kind.is_word(w))
}

struct Line {
    tokens: Vec<Token>,
    /// Position just past the last token, used for Eof and "missing" reports.
    end: Token,
}

impl Line {
    fn first(&self) -> &Token {
        self.tokens.first().unwrap_or(&self.end)
    }

    fn nth_kind(&self, n: usize) -> &TokenKind {
        self.tokens.get(n).map_or(&TokenKind::Eof, |t| &t.kind)
    }
}

fn significant_lines(source: &str) -> Vec<Line> {
    source
        .lines()
        .enumerate()
        .filter(|(_, text)| {
            let t = text.trim_start();
            !(t.is_empty() || t.starts_with('#') || t.starts_with("//"))
        })
        .map(|(i, text)| {
            let mut tokens = Lexer::new(text).starting_at_line(i + 1).tokenize();
            // tokenize always ends with Eof
            let end = tokens.pop().unwrap_or(Token {
                kind: TokenKind::Eof,
                line: i + 1,
                col: 1,
            });
            Line { tokens, end }
        })
        .collect()
}

/// How a block ended.
enum BlockEnd {
    Fin,
    Sinon,
    EndOfInput,
}

pub struct ProgramParser {
    lines: Vec<Line>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl ProgramParser {
    pub fn new(source: &str) -> Self {
        Self {
            lines: significant_lines(source),
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn parse_program(&mut self) -> Vec<Stmt> {
        let mut program = Vec::new();
        loop {
            let (mut stmts, end) = self.parse_block(false);
            program.append(&mut stmts);
            match end {
                BlockEnd::EndOfInput => break,
                BlockEnd::Fin => self.report_previous("'FIN' without an open block"),
                BlockEnd::Sinon => self.report_previous("'SINON' without 'SI'"),
            }
        }
        tracing::debug!(statements = program.len(), diagnostics = self.diagnostics.len(), "parsed program");
        program
    }

    fn report_previous(&mut self, msg: &str) {
        let at = &self.lines[self.pos - 1];
        let diag = Diagnostic::at_token(msg, at.first());
        self.diagnostics.push(diag);
    }

    fn parse_block(&mut self, allow_else: bool) -> (Vec<Stmt>, BlockEnd) {
        let mut body = Vec::new();
        while self.pos < self.lines.len() {
            let idx = self.pos;
            self.pos += 1;
            let first = self.lines[idx].first().kind.clone();
            if first.is_word("FIN") {
                return (body, BlockEnd::Fin);
            }
            if first.is_word("SINON") {
                if allow_else {
                    self.expect_line_end(idx, 1);
                    return (body, BlockEnd::Sinon);
                }
                self.report_previous("'SINON' without 'SI'");
                continue;
            }
            if let Some(stmt) = self.parse_statement(idx) {
                body.push(stmt);
            }
        }
        (body, BlockEnd::EndOfInput)
    }

    /// Parses the body of a block opened on line `opener`, reporting a
    /// missing `FIN`.
    fn parse_body(&mut self, opener: usize, allow_else: bool) -> (Vec<Stmt>, BlockEnd) {
        let (body, end) = self.parse_block(allow_else);
        if let BlockEnd::EndOfInput = end {
            let tok = self.lines[opener].first();
            let diag = Diagnostic::at_token(
                format!("Missing 'FIN' for block opened by {}", tok.kind.describe()),
                tok,
            );
            self.diagnostics.push(diag);
        }
        (body, end)
    }

    fn parse_statement(&mut self, idx: usize) -> Option<Stmt> {
        let first = self.lines[idx].first().kind.clone();
        let keyword = match &first {
            TokenKind::Ident(word) => word.to_ascii_uppercase(),
            other => {
                let diag = Diagnostic::at_token(
                    format!("Expected a statement, found {}", other.describe()),
                    self.lines[idx].first(),
                );
                self.diagnostics.push(diag);
                return None;
            }
        };
        match keyword.as_str() {
            "SI" => self.parse_if(idx),
            "TANT" => self.parse_while(idx),
            "POUR" => self.parse_for(idx),
            "FONCTION" => self.parse_function(idx),
            "AFFICHER" => {
                let value = self.expr_from(idx, 1, None)?;
                Some(Stmt::Display(value))
            }
            "LIRE" => {
                let variable = self.ident_at(idx, 1, "a variable name after 'LIRE'")?;
                self.expect_line_end(idx, 2);
                Some(Stmt::Input(variable))
            }
            "RETOURNER" => {
                if self.lines[idx].tokens.len() == 1 {
                    return Some(Stmt::Return(None));
                }
                let value = self.expr_from(idx, 1, None)?;
                Some(Stmt::Return(Some(value)))
            }
            "SORTIR" => {
                self.expect_line_end(idx, 1);
                Some(Stmt::Break)
            }
            "CONTINUER" => {
                self.expect_line_end(idx, 1);
                Some(Stmt::Continue)
            }
            _ => self.parse_simple(idx),
        }
    }

    /// `name = expr` or a call statement.
    fn parse_simple(&mut self, idx: usize) -> Option<Stmt> {
        let line = &self.lines[idx];
        match (line.nth_kind(0), line.nth_kind(1)) {
            (TokenKind::Ident(name), TokenKind::Equal) => {
                let variable = name.clone();
                let value = self.expr_from(idx, 2, None)?;
                Some(Stmt::Assign { variable, value })
            }
            (TokenKind::Ident(_), TokenKind::LParen) => match self.expr_from(idx, 0, None)? {
                Expr::Call { callee, args } => Some(Stmt::Call { callee, args }),
                _ => {
                    self.report_at(idx, 0, "Expected a statement, found an expression");
                    None
                }
            },
            (first, _) => {
                let msg = format!("Expected a statement, found {}", first.describe());
                self.report_at(idx, 0, &msg);
                None
            }
        }
    }

    fn parse_if(&mut self, idx: usize) -> Option<Stmt> {
        let condition = self.expr_from(idx, 1, Some("ALORS"));
        let (then_body, end) = self.parse_body(idx, true);
        let else_body = match end {
            BlockEnd::Sinon => Some(self.parse_body(idx, false).0),
            _ => None,
        };
        Some(Stmt::If {
            condition: condition?,
            then_body,
            else_body,
        })
    }

    fn parse_while(&mut self, idx: usize) -> Option<Stmt> {
        let condition = if self.lines[idx].nth_kind(1).is_word("QUE") {
            self.expr_from(idx, 2, Some("FAIRE"))
        } else {
            self.report_at(idx, 1, "Expected 'QUE' after 'TANT'");
            None
        };
        let (body, _) = self.parse_body(idx, false);
        Some(Stmt::While {
            condition: condition?,
            body,
        })
    }

    fn parse_for(&mut self, idx: usize) -> Option<Stmt> {
        let header = self.parse_for_header(idx);
        let (body, _) = self.parse_body(idx, false);
        let (variable, start, end) = header?;
        Some(Stmt::For {
            variable,
            start,
            end,
            body,
        })
    }

    fn parse_for_header(&mut self, idx: usize) -> Option<(String, Expr, Expr)> {
        let variable = self.ident_at(idx, 1, "a loop variable after 'POUR'")?;
        if !self.lines[idx].nth_kind(2).is_word("DE") {
            self.report_at(idx, 2, "Expected 'DE' after the loop variable");
            return None;
        }
        let line_end = self.lines[idx].end.clone();
        let full = &self.lines[idx].tokens[3..];
        let is_to = |k: &TokenKind| k.is_word("A") || matches!(k, TokenKind::Unknown(s) if s == "À" || s == "à");

        // `A` is also a fine variable name, so every top-level `A` is a
        // candidate split; take the first one where both bounds parse cleanly.
        let mut first = None;
        for tokens in without_trailing_word(full, "FAIRE") {
            for split in find_all_top_level(tokens, is_to) {
                let start = try_parse(tokens[..split].to_vec(), &tokens[split]);
                let end = try_parse(tokens[split + 1..].to_vec(), &line_end);
                if let (Some(start), Some(end)) = (&start.0, &end.0) {
                    return Some((variable, start.clone(), end.clone()));
                }
                first.get_or_insert((start, end));
            }
        }

        let Some(((start, start_diags), (end, end_diags))) = first else {
            self.report_at(idx, 0, "Expected 'A' between the loop bounds");
            return None;
        };
        self.diagnostics.extend(start_diags);
        self.diagnostics.extend(end_diags);
        Some((variable, start?, end?))
    }

    fn parse_function(&mut self, idx: usize) -> Option<Stmt> {
        let header = self.parse_function_header(idx);
        let (body, _) = self.parse_body(idx, false);
        let (name, params) = header?;
        Some(Stmt::Func(Function { name, params, body }))
    }

    fn parse_function_header(&mut self, idx: usize) -> Option<(String, Vec<String>)> {
        let name = self.ident_at(idx, 1, "a function name after 'FONCTION'")?;
        if !matches!(self.lines[idx].nth_kind(2), TokenKind::LParen) {
            self.report_at(idx, 2, "Expected '(' after the function name");
            return None;
        }
        let mut params = Vec::new();
        let mut n = 3;
        if !matches!(self.lines[idx].nth_kind(n), TokenKind::RParen) {
            loop {
                params.push(self.ident_at(idx, n, "a parameter name")?);
                n += 1;
                match self.lines[idx].nth_kind(n) {
                    TokenKind::Comma => n += 1,
                    TokenKind::RParen => break,
                    _ => {
                        self.report_at(idx, n, "Expected ',' or ')' in the parameter list");
                        return None;
                    }
                }
            }
        }
        self.expect_line_end(idx, n + 1);
        Some((name, params))
    }

    fn token_at(&self, idx: usize, n: usize) -> &Token {
        let line = &self.lines[idx];
        line.tokens.get(n).unwrap_or(&line.end)
    }

    fn report_at(&mut self, idx: usize, n: usize, msg: &str) {
        let diag = Diagnostic::at_token(msg, self.token_at(idx, n));
        self.diagnostics.push(diag);
    }

    fn ident_at(&mut self, idx: usize, n: usize, what: &str) -> Option<String> {
        match self.lines[idx].nth_kind(n) {
            TokenKind::Ident(name) => Some(name.clone()),
            other => {
                let msg = format!("Expected {}, found {}", what, other.describe());
                self.report_at(idx, n, &msg);
                None
            }
        }
    }

    fn expect_line_end(&mut self, idx: usize, n: usize) {
        if let Some(extra) = self.lines[idx].tokens.get(n) {
            let diag = Diagnostic::at_token(format!("Unexpected {}", extra.kind.describe()), extra);
            self.diagnostics.push(diag);
        }
    }

    /// Parses tokens `from..` of line `idx` as one expression, dropping an
    /// optional trailing keyword (`ALORS`, `FAIRE`).
    fn expr_from(&mut self, idx: usize, from: usize, trailing: Option<&str>) -> Option<Expr> {
        let line = &self.lines[idx];
        let tokens = line.tokens.get(from..).unwrap_or(&[]);
        let at = line.end.clone();
        let Some(word) = trailing else {
            return self.parse_tokens(tokens.to_vec(), &at);
        };
        // A trailing `ALORS`/`FAIRE` is normally the keyword, but it may also be
        // a variable that ends the condition.
        let mut first = None;
        for candidate in without_trailing_word(tokens, word) {
            match try_parse(candidate.to_vec(), &at) {
                (Some(expr), diags) if diags.is_empty() => return Some(expr),
                attempt => {
                    first.get_or_insert(attempt);
                }
            }
        }
        let (expr, diagnostics) = first?;
        self.diagnostics.extend(diagnostics);
        expr
    }

    fn parse_tokens(&mut self, tokens: Vec<Token>, end: &Token) -> Option<Expr> {
        let (expr, diagnostics) = try_parse(tokens, end);
        self.diagnostics.extend(diagnostics);
        expr
    }
}

/// Parses `tokens` as one expression. The expression is only returned when
/// there are no diagnostics.
fn try_parse(mut tokens: Vec<Token>, end: &Token) -> (Option<Expr>, Vec<Diagnostic>) {
    if tokens.is_empty() {
        return (None, vec![Diagnostic::at_token("Expected an expression", end)]);
    }
    tokens.push(Token {
        kind: TokenKind::Eof,
        line: end.line,
        col: end.col,
    });
    let mut parser = Parser::new(tokens);
    let expr = parser.parse();
    let diagnostics = parser.into_diagnostics();
    if diagnostics.is_empty() {
        (expr, diagnostics)
    } else {
        (None, diagnostics)
    }
}

/// `tokens` without a trailing `word`, then `tokens` as they are. Yields a
/// single slice when there is no such word.
fn without_trailing_word<'t>(tokens: &'t [Token], word: &str) -> Vec<&'t [Token]> {
    let stripped = strip_trailing_word(tokens, word);
    if stripped.len() == tokens.len() {
        vec![tokens]
    } else {
        vec![stripped, tokens]
    }
}

fn strip_trailing_word<'t>(tokens: &'t [Token], word: &str) -> &'t [Token] {
    match tokens.split_last() {
        Some((last, rest)) if last.kind.is_word(word) => rest,
        _ => tokens,
    }
}

/// Indices of the tokens outside any brackets that satisfy `pred`.
fn find_all_top_level(tokens: &[Token], pred: impl Fn(&TokenKind) -> bool) -> Vec<usize> {
    let mut depth = 0i32;
    let mut found = Vec::new();
    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::LParen | TokenKind::LBracket => depth += 1,
            TokenKind::RParen | TokenKind::RBracket => depth -= 1,
            ref k if depth == 0 && pred(k) => found.push(i),
            _ => {}
        }
    }
    found
}
