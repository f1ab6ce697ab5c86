//! Builtin functions. Arguments arrive already evaluated.

use crate::error::EvalError;
use crate::ops::to_number;
use crate::value::Value;

type BuiltinResult = std::result::Result<Value, EvalError>;

pub const NAMES: &[&str] = &["abs", "floor", "len", "max", "min", "round", "sqrt"];

pub fn is_builtin(name: &str) -> bool {
    NAMES.contains(&name)
}

fn arity(name: &str, args: &[Value], expected: usize) -> std::result::Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::ArityMismatch {
            name: name.to_string(),
            expected,
            got: args.len(),
        })
    }
}

/// Runs builtin `name`, or returns `None` when no builtin has that name.
pub fn call(name: &str, args: &[Value], strict: bool) -> Option<BuiltinResult> {
    let result = match name {
        "len" => call_len(args),
        "abs" => unary_math(name, args, strict, f64::abs),
        "floor" => unary_math(name, args, strict, f64::floor),
        "round" => unary_math(name, args, strict, f64::round),
        "sqrt" => call_sqrt(args, strict),
        "min" => binary_math(name, args, strict, f64::min),
        "max" => binary_math(name, args, strict, f64::max),
        _ => return None,
    };
    Some(result)
}

/// Length of a string (in characters) or list
fn call_len(args: &[Value]) -> BuiltinResult {
    arity("len", args, 1)?;
    match &args[0] {
        Value::Str(s) => Ok(Value::Number(s.chars().count() as f64)),
        Value::List(items) => Ok(Value::Number(items.len() as f64)),
        other => Err(EvalError::TypeMismatch(format!(
            "len() expects string or list, got {}",
            other.type_name()
        ))),
    }
}

fn unary_math(name: &str, args: &[Value], strict: bool, f: fn(f64) -> f64) -> BuiltinResult {
    arity(name, args, 1)?;
    Ok(Value::Number(f(to_number(&args[0], strict, name)?)))
}

fn binary_math(name: &str, args: &[Value], strict: bool, f: fn(f64, f64) -> f64) -> BuiltinResult {
    arity(name, args, 2)?;
    let a = to_number(&args[0], strict, name)?;
    let b = to_number(&args[1], strict, name)?;
    Ok(Value::Number(f(a, b)))
}

fn call_sqrt(args: &[Value], strict: bool) -> BuiltinResult {
    arity("sqrt", args, 1)?;
    let n = to_number(&args[0], strict, "sqrt")?;
    if n < 0.0 {
        return Err(EvalError::TypeMismatch(
            "sqrt() argument cannot be negative".to_string(),
        ));
    }
    Ok(Value::Number(n.sqrt()))
}
