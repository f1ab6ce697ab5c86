//! Runtime error taxonomy.
//!
//! Any error escaping a run stops it at the failing statement; bindings made
//! by earlier statements stay as they are.

use thiserror::Error;

/// Failures raised while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("Undefined function '{0}'")]
    UndefinedFunction(String),

    #[error("Function '{name}' expected {expected} args, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    /// A function finished without `RETOURNER <expr>` but its result was used.
    #[error("Function '{0}' returned no value")]
    NoReturnValue(String),

    /// User function calls nested deeper than `MAX_CALL_DEPTH`.
    #[error("Recursion limit exceeded in function '{0}'")]
    RecursionLimit(String),
}

/// Non-local control flow that found nothing to stop it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlFlowError {
    #[error("'{0}' outside of loop")]
    LoopControlOutsideLoop(&'static str),

    #[error("'RETOURNER' outside of function")]
    ReturnOutsideFunction,
}

/// Everything that can stop a run.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    ControlFlow(#[from] ControlFlowError),

    /// Raised by a print or input callback; never swallowed.
    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),
}

impl RuntimeError {
    pub fn as_eval(&self) -> Option<&EvalError> {
        match self {
            RuntimeError::Eval(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
