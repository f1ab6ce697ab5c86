//! AST (abstract syntax tree) types for the Turing pseudocode language.
//!
//! Trees own their children and carry no parent links. Nothing here mutates
//! after construction; the interpreter only ever borrows them.

use std::fmt;

use serde::Serialize;

/// Canonical operator set.
///
/// `ET`/`&` and `OU`/`|` are two spellings of one operator each; the lexer
/// folds them so the AST never records which spelling was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    And,
    Or,
    Xor,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Not,
}

impl Op {
    /// The canonical surface symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Pow => "^",
            Op::And => "&",
            Op::Or => "|",
            Op::Xor => "XOR",
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Not => "NON",
        }
    }

    /// Resolves a word operator, case-insensitively.
    pub fn from_word(word: &str) -> Option<Op> {
        match word.to_ascii_uppercase().as_str() {
            "ET" => Some(Op::And),
            "OU" => Some(Op::Or),
            "XOR" => Some(Op::Xor),
            "NON" => Some(Op::Not),
            _ => None,
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::Lt | Op::Le | Op::Gt | Op::Ge)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expressions (literals, operations, calls, containers).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Number(f64),
    String(String),
    Identifier(String),
    BinOp {
        left: Box<Expr>,
        right: Box<Expr>,
        op: Op,
    },
    UnaryOp {
        operand: Box<Expr>,
        op: Op,
    },
    /// A call always names its callee; calling the result of an arbitrary
    /// expression is not part of the language.
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    ArrayAccess {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    List(Vec<Expr>),
}

impl Expr {
    pub fn binary(left: Expr, op: Op, right: Expr) -> Expr {
        Expr::BinOp {
            left: Box::new(left),
            right: Box::new(right),
            op,
        }
    }

    pub fn unary(op: Op, operand: Expr) -> Expr {
        Expr::UnaryOp {
            operand: Box::new(operand),
            op,
        }
    }

    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::String(value.into())
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: callee.into(),
            args,
        }
    }

    pub fn index(base: Expr, index: Expr) -> Expr {
        Expr::ArrayAccess {
            base: Box::new(base),
            index: Box::new(index),
        }
    }
}

/// Named function definition: parameters and body, no captured locals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

/// Statements (bindings, control flow, console I/O).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Assign {
        variable: String,
        value: Expr,
    },
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    /// Inclusive counting loop; `start` and `end` are evaluated once.
    For {
        variable: String,
        start: Expr,
        end: Expr,
        body: Vec<Stmt>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    Func(Function),
    Return(Option<Expr>),
    /// A call made for its side effects; the result, if any, is discarded.
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    Display(Expr),
    Input(String),
    Break,
    Continue,
    /// An ordered group of statements sharing the enclosing scope.
    Block(Vec<Stmt>),
}
