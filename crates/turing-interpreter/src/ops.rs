//! Operator semantics over runtime values.
//!
//! Strict typing only changes what happens when an operand has the wrong
//! type: strict mode fails with `TypeMismatch`, non-strict mode first tries a
//! coercion (numeric parse of strings, cross-type equality). Division by zero
//! fails in both modes.

use std::cmp::Ordering;
use std::rc::Rc;

use turing_syntax::ast::Op;

use crate::error::EvalError;
use crate::value::Value;

type OpResult = std::result::Result<Value, EvalError>;

fn mismatch(msg: String) -> EvalError {
    EvalError::TypeMismatch(msg)
}

/// Reads `v` as a number for operator `what`.
pub fn to_number(v: &Value, strict: bool, what: &str) -> std::result::Result<f64, EvalError> {
    match v {
        Value::Number(n) => Ok(*n),
        Value::Str(s) if !strict => s
            .trim()
            .parse::<f64>()
            .map_err(|_| mismatch(format!("'{}' expects numbers, got string \"{}\"", what, s))),
        other => Err(mismatch(format!("'{}' expects numbers, got {}", what, other.type_name()))),
    }
}

pub fn unary(op: Op, operand: Value, strict: bool) -> OpResult {
    match op {
        Op::Sub => Ok(Value::Number(-to_number(&operand, strict, "-")?)),
        Op::Not => Ok(Value::from_bool(!operand.is_truthy())),
        other => Err(mismatch(format!("'{}' is not a unary operator", other))),
    }
}

pub fn binary(op: Op, left: Value, right: Value, strict: bool) -> OpResult {
    match op {
        Op::Add => add(left, right, strict),
        Op::Sub | Op::Mul | Op::Div | Op::Mod | Op::Pow | Op::And | Op::Or | Op::Xor => {
            let a = to_number(&left, strict, op.symbol())?;
            let b = to_number(&right, strict, op.symbol())?;
            arithmetic(op, a, b)
        }
        Op::Eq => equals(&left, &right, strict).map(Value::from_bool),
        Op::Ne => equals(&left, &right, strict).map(|eq| Value::from_bool(!eq)),
        Op::Lt | Op::Le | Op::Gt | Op::Ge => {
            let ord = compare(op, &left, &right, strict)?;
            let holds = match op {
                Op::Lt => ord == Some(Ordering::Less),
                Op::Le => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
                Op::Gt => ord == Some(Ordering::Greater),
                _ => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
            };
            Ok(Value::from_bool(holds))
        }
        Op::Not => Err(mismatch("'NON' is not a binary operator".to_string())),
    }
}

fn add(left: Value, right: Value, strict: bool) -> OpResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(a), b) => Ok(Value::Str(format!("{}{}", a, b))),
        (a, Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
        (Value::List(mut a), Value::List(b)) if !strict => {
            a.extend(b);
            Ok(Value::List(a))
        }
        (a, b) => Err(mismatch(format!("Cannot add {} and {}", a.type_name(), b.type_name()))),
    }
}

fn as_integer(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Some(n as i64)
    } else {
        None
    }
}

fn arithmetic(op: Op, a: f64, b: f64) -> OpResult {
    let n = match op {
        Op::Sub => a - b,
        Op::Mul => a * b,
        Op::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
        Op::Mod => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            // floored: the result takes the sign of the divisor
            a - b * (a / b).floor()
        }
        Op::Pow => a.powf(b),
        Op::And | Op::Or | Op::Xor => match (as_integer(a), as_integer(b)) {
            (Some(x), Some(y)) => match op {
                Op::And => (x & y) as f64,
                Op::Or => (x | y) as f64,
                _ => (x ^ y) as f64,
            },
            _ => {
                let (p, q) = (a != 0.0, b != 0.0);
                let holds = match op {
                    Op::And => p && q,
                    Op::Or => p || q,
                    _ => p != q,
                };
                if holds {
                    1.0
                } else {
                    0.0
                }
            }
        },
        other => return Err(mismatch(format!("'{}' is not an arithmetic operator", other))),
    };
    Ok(Value::Number(n))
}

/// Structural equality. Mixed types are an error in strict mode; otherwise a
/// number equals a string that parses to it, and anything else is unequal.
pub fn equals(left: &Value, right: &Value, strict: bool) -> std::result::Result<bool, EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::List(a), Value::List(b)) => {
            if a.len() != b.len() {
                return Ok(false);
            }
            for (x, y) in a.iter().zip(b) {
                if !equals(x, y, strict)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Value::Function(a), Value::Function(b)) => Ok(Rc::ptr_eq(a, b) || a == b),
        (a, b) if strict => Err(mismatch(format!(
            "Cannot compare {} with {}",
            a.type_name(),
            b.type_name()
        ))),
        (Value::Number(n), Value::Str(s)) | (Value::Str(s), Value::Number(n)) => {
            Ok(s.trim().parse::<f64>().map_or(false, |m| m == *n))
        }
        _ => Ok(false),
    }
}

fn compare(op: Op, left: &Value, right: &Value, strict: bool) -> std::result::Result<Option<Ordering>, EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        (a @ (Value::Number(_) | Value::Str(_)), b @ (Value::Number(_) | Value::Str(_))) if !strict => {
            let x = to_number(a, strict, op.symbol())?;
            let y = to_number(b, strict, op.symbol())?;
            Ok(x.partial_cmp(&y))
        }
        (a, b) => Err(mismatch(format!(
            "'{}' cannot order {} and {}",
            op,
            a.type_name(),
            b.type_name()
        ))),
    }
}

/// `base[index]` on lists. Indices must be integral and in bounds.
pub fn index(base: Value, index: Value, strict: bool) -> OpResult {
    let items = match base {
        Value::List(items) => items,
        other => return Err(EvalError::InvalidIndex(format!("cannot index a {}", other.type_name()))),
    };
    let i = to_number(&index, strict, "[]").map_err(|_| {
        EvalError::InvalidIndex(format!("index must be a number, got {}", index.type_name()))
    })?;
    match as_integer(i) {
        Some(ix) if ix >= 0 && (ix as usize) < items.len() => Ok(items[ix as usize].clone()),
        _ => Err(EvalError::InvalidIndex(format!(
            "index {} out of bounds for list of length {}",
            turing_syntax::printer::format_number(i),
            items.len()
        ))),
    }
}
