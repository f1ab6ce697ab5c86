//! Statement execution.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};
use turing_syntax::ast::{Expr, Function, Stmt};

use crate::config::Config;
use crate::console::Console;
use crate::env::Env;
use crate::error::{ControlFlowError, EvalError, Result, RuntimeError};
use crate::flow::Flow;
use crate::ops::to_number;
use crate::value::Value;

/// How many user function calls may be in progress at once. Deeper calls
/// fail with [`EvalError::RecursionLimit`] instead of overflowing the stack.
pub const MAX_CALL_DEPTH: usize = 200;

/// Runs statement trees against an [`Env`], sending all I/O to a [`Console`].
pub struct Interpreter<'io> {
    pub(crate) config: Config,
    /// Every function defined so far in this run, by name
    pub(crate) functions: HashMap<String, Rc<Function>>,
    pub(crate) console: &'io mut dyn Console,
    /// User function calls currently in progress
    depth: usize,
}

impl<'io> Interpreter<'io> {
    pub fn new(config: Config, console: &'io mut dyn Console) -> Self {
        Self {
            config,
            functions: HashMap::new(),
            console,
            depth: 0,
        }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn set_strict_typing(&mut self, strict: bool) {
        self.config.strict_typing = strict;
    }

    pub fn function_names(&self) -> Vec<String> {
        let mut v: Vec<String> = self.functions.keys().cloned().collect();
        v.sort();
        v
    }

    /// Forgets every function defined so far.
    pub fn reset(&mut self) {
        self.functions.clear();
    }

    /// Runs `program` in a fresh environment.
    pub fn run(&mut self, program: &[Stmt]) -> Result<()> {
        let mut env = Env::new();
        self.run_with_env(program, &mut env)
    }

    /// Runs `program` against `env`. Bindings made before a failing statement
    /// are kept.
    #[tracing::instrument(level = "trace", skip_all, fields(statements = program.len()))]
    pub fn run_with_env(&mut self, program: &[Stmt], env: &mut Env) -> Result<()> {
        match self.exec_block(env, program)? {
            Flow::Normal => Ok(()),
            Flow::Break => Err(ControlFlowError::LoopControlOutsideLoop("SORTIR").into()),
            Flow::Continue => Err(ControlFlowError::LoopControlOutsideLoop("CONTINUER").into()),
            Flow::Return(_) => Err(ControlFlowError::ReturnOutsideFunction.into()),
        }
    }

    pub(crate) fn exec_block(&mut self, env: &mut Env, body: &[Stmt]) -> Result<Flow> {
        for s in body {
            match self.exec_stmt(env, s)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, env: &mut Env, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Assign { variable, value } => {
                let v = self.eval_expr(env, value)?;
                trace!(%variable, value = %v, "assign");
                env.set(variable.clone(), v);
                Ok(Flow::Normal)
            }
            Stmt::Display(value) => {
                let v = self.eval_expr(env, value)?;
                self.console.print(&format!("{}\n", v))?;
                Ok(Flow::Normal)
            }
            Stmt::Input(variable) => {
                let answer = self.console.input(&format!("Variable {} = ", variable))?;
                let v = match answer.trim().parse::<f64>() {
                    Ok(n) => Value::Number(n),
                    Err(_) => Value::Str(answer),
                };
                env.set(variable.clone(), v);
                Ok(Flow::Normal)
            }
            Stmt::If {
                condition,
                then_body,
                else_body,
            } => {
                if self.eval_expr(env, condition)?.is_truthy() {
                    self.exec_block(env, then_body)
                } else if let Some(else_body) = else_body {
                    self.exec_block(env, else_body)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While { condition, body } => {
                while self.eval_expr(env, condition)?.is_truthy() {
                    match self.exec_block(env, body)? {
                        Flow::Normal | Flow::Continue => {}
                        Flow::Break => break,
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::For {
                variable,
                start,
                end,
                body,
            } => self.exec_for(env, variable, start, end, body),
            Stmt::Func(func) => {
                debug!(name = %func.name, params = func.params.len(), "define function");
                let func = Rc::new(func.clone());
                env.set(func.name.clone(), Value::Function(Rc::clone(&func)));
                self.functions.insert(func.name.clone(), func);
                Ok(Flow::Normal)
            }
            Stmt::Return(value) => {
                let v = match value {
                    Some(e) => Some(self.eval_expr(env, e)?),
                    None => None,
                };
                Ok(Flow::Return(v))
            }
            Stmt::Call { callee, args } => {
                self.call(env, callee, args)?;
                Ok(Flow::Normal)
            }
            Stmt::Break => Ok(Flow::Break),
            Stmt::Continue => Ok(Flow::Continue),
            Stmt::Block(body) => self.exec_block(env, body),
        }
    }

    /// Counts from `start` to `end` inclusive by one. Both bounds are read
    /// once. Whatever `variable` held before the loop is put back afterwards,
    /// including "unbound".
    fn exec_for(
        &mut self,
        env: &mut Env,
        variable: &str,
        start: &Expr,
        end: &Expr,
        body: &[Stmt],
    ) -> Result<Flow> {
        let strict = self.config.strict_typing;
        let start = to_number(&self.eval_expr(env, start)?, strict, "POUR")?;
        let end = to_number(&self.eval_expr(env, end)?, strict, "POUR")?;
        let saved = env.get(variable).cloned();
        trace!(%variable, start, end, "for");

        // Iterations are counted up front so huge bounds cannot stall on
        // `counter + 1.0 == counter`. NaN bounds give no iterations.
        let count = if end >= start {
            ((end - start).floor() + 1.0) as u64
        } else {
            0
        };
        let mut outcome = Flow::Normal;
        for k in 0..count {
            env.set(variable, Value::Number(start + k as f64));
            match self.exec_block(env, body)? {
                Flow::Normal | Flow::Continue => {}
                Flow::Break => break,
                ret @ Flow::Return(_) => {
                    outcome = ret;
                    break;
                }
            }
        }
        env.restore(variable, saved);
        Ok(outcome)
    }

    /// Runs a user function body in a scope holding only its parameters.
    pub(crate) fn invoke(&mut self, func: &Function, args: Vec<Value>) -> Result<Option<Value>> {
        debug!(name = %func.name, args = args.len(), "call");
        let mut scope = Env::new();
        for (param, arg) in func.params.iter().zip(args) {
            scope.set(param.clone(), arg);
        }
        if self.depth >= MAX_CALL_DEPTH {
            return Err(EvalError::RecursionLimit(func.name.clone()).into());
        }
        self.depth += 1;
        let flow = self.exec_block(&mut scope, &func.body);
        self.depth -= 1;
        match flow? {
            Flow::Normal => Ok(None),
            Flow::Return(v) => Ok(v),
            Flow::Break => Err(RuntimeError::ControlFlow(
                ControlFlowError::LoopControlOutsideLoop("SORTIR"),
            )),
            Flow::Continue => Err(RuntimeError::ControlFlow(
                ControlFlowError::LoopControlOutsideLoop("CONTINUER"),
            )),
        }
    }
}
