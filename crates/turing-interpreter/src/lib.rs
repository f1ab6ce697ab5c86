//! Turing interpreter: evaluates expression trees and runs statement trees.
//!
//! A run executes statements in order against one [`Env`]. Expressions are
//! evaluated by the same [`Interpreter`], so function calls inside an
//! expression can print and read input. `SORTIR` and `CONTINUER` travel up
//! through nested blocks as a control-flow outcome until the nearest loop
//! consumes them.

pub mod builtins;
pub mod config;
pub mod console;
pub mod env;
pub mod error;
mod eval;
mod flow;
pub mod interpreter;
pub mod ops;
pub mod value;

use std::io;

use turing_syntax::ast::{Expr, Stmt};

pub use config::Config;
pub use console::{Callbacks, Console, NullConsole, StdConsole};
pub use env::Env;
pub use error::{ControlFlowError, EvalError, Result, RuntimeError};
pub use interpreter::{Interpreter, MAX_CALL_DEPTH};
pub use value::Value;

/// Runs `statements` against `env` with non-strict typing. `print` receives
/// each displayed line including its trailing newline; `input` receives the
/// prompt and returns the answer. An error from either callback stops the run.
pub fn run<P, I>(statements: &[Stmt], env: &mut Env, print: P, input: I) -> Result<()>
where
    P: FnMut(&str) -> io::Result<()>,
    I: FnMut(&str) -> io::Result<String>,
{
    run_with_config(statements, env, Config::default(), print, input)
}

pub fn run_with_config<P, I>(
    statements: &[Stmt],
    env: &mut Env,
    config: Config,
    print: P,
    input: I,
) -> Result<()>
where
    P: FnMut(&str) -> io::Result<()>,
    I: FnMut(&str) -> io::Result<String>,
{
    let mut console = Callbacks { print, input };
    Interpreter::new(config, &mut console).run_with_env(statements, env)
}

/// Evaluates a lone expression. Output from any function it calls is
/// discarded and input is unavailable.
pub fn evaluate(expr: &Expr, env: &Env, strict_typing: bool) -> Result<Value> {
    let mut console = NullConsole;
    Interpreter::new(Config { strict_typing }, &mut console).evaluate(expr, env)
}
