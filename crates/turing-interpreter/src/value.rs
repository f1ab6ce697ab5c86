//! Value types for the Turing interpreter.

use std::fmt;
use std::rc::Rc;

use turing_syntax::ast::Function;
use turing_syntax::printer::format_number;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Every number is a 64-bit float; booleans are 1 and 0
    Number(f64),
    /// A UTF-8 string
    Str(String),
    /// An ordered list of values
    List(Vec<Value>),
    /// A function definition; it captures nothing from its surroundings
    Function(Rc<Function>),
}

impl Value {
    pub fn from_bool(b: bool) -> Value {
        Value::Number(if b { 1.0 } else { 0.0 })
    }

    /// Non-zero numbers, non-empty strings and non-empty lists are true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Function(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Function(_) => "function",
        }
    }

    fn fmt_item(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{}\"", s),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, it) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    it.fmt_item(f)?;
                }
                write!(f, "]")
            }
            Value::Function(func) => write!(f, "<fonction {}({})>", func.name, func.params.join(", ")),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
