//! Control flow for the interpreter.

use crate::value::Value;

/// How a statement or block finished. Loops consume `Break` and `Continue`,
/// function calls consume `Return`; anything left at the top of a run is an
/// error.
#[derive(Debug)]
pub(crate) enum Flow {
    /// Fell through to the next statement
    Normal,
    /// Return from function, with or without a value
    Return(Option<Value>),
    /// Break out of current loop
    Break,
    /// Continue to next loop iteration
    Continue,
}
