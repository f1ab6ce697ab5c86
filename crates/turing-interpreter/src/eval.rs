//! Expression evaluation and call dispatch.

use std::rc::Rc;

use turing_syntax::ast::Expr;

use crate::builtins;
use crate::env::Env;
use crate::error::{EvalError, Result};
use crate::interpreter::Interpreter;
use crate::ops;
use crate::value::Value;

impl Interpreter<'_> {
    /// Evaluates `expr` against `env`. Functions called from the expression
    /// may print or read input through this interpreter's console.
    pub fn evaluate(&mut self, expr: &Expr, env: &Env) -> Result<Value> {
        self.eval_expr(env, expr)
    }

    pub(crate) fn eval_expr(&mut self, env: &Env, expr: &Expr) -> Result<Value> {
        let strict = self.config.strict_typing;
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::String(s) => Ok(Value::Str(s.clone())),
            Expr::Identifier(name) => match env.get(name) {
                Some(v) => Ok(v.clone()),
                None => match self.functions.get(name) {
                    Some(f) => Ok(Value::Function(Rc::clone(f))),
                    None => Err(EvalError::UndefinedVariable(name.clone()).into()),
                },
            },
            Expr::BinOp { left, right, op } => {
                let l = self.eval_expr(env, left)?;
                let r = self.eval_expr(env, right)?;
                Ok(ops::binary(*op, l, r, strict)?)
            }
            Expr::UnaryOp { operand, op } => {
                let v = self.eval_expr(env, operand)?;
                Ok(ops::unary(*op, v, strict)?)
            }
            Expr::List(items) => {
                let mut v = Vec::with_capacity(items.len());
                for it in items {
                    v.push(self.eval_expr(env, it)?);
                }
                Ok(Value::List(v))
            }
            Expr::ArrayAccess { base, index } => {
                let b = self.eval_expr(env, base)?;
                let i = self.eval_expr(env, index)?;
                Ok(ops::index(b, i, strict)?)
            }
            Expr::Call { callee, args } => match self.call(env, callee, args)? {
                Some(v) => Ok(v),
                None => Err(EvalError::NoReturnValue(callee.clone()).into()),
            },
        }
    }

    /// Calls `callee`, looking it up as a function bound in `env`, then in
    /// the functions defined during this run, then among the builtins.
    /// `None` means the function finished without returning a value.
    pub(crate) fn call(&mut self, env: &Env, callee: &str, args: &[Expr]) -> Result<Option<Value>> {
        let func = match env.get(callee) {
            Some(Value::Function(f)) => Some(Rc::clone(f)),
            _ => self.functions.get(callee).cloned(),
        };

        let Some(func) = func else {
            if !builtins::is_builtin(callee) {
                return Err(EvalError::UndefinedFunction(callee.to_string()).into());
            }
            let values = self.eval_args(env, args)?;
            return match builtins::call(callee, &values, self.config.strict_typing) {
                Some(result) => Ok(Some(result?)),
                None => Err(EvalError::UndefinedFunction(callee.to_string()).into()),
            };
        };

        if func.params.len() != args.len() {
            return Err(EvalError::ArityMismatch {
                name: callee.to_string(),
                expected: func.params.len(),
                got: args.len(),
            }
            .into());
        }
        let values = self.eval_args(env, args)?;
        self.invoke(&func, values)
    }

    fn eval_args(&mut self, env: &Env, args: &[Expr]) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(args.len());
        for a in args {
            values.push(self.eval_expr(env, a)?);
        }
        Ok(values)
    }
}
