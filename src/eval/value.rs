//! Runtime values.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::error::EvalErrorKind;

/// A runtime value produced by evaluating an expression.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
        }
    }

    /// `0`, `0.0`, `""` and `false` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Numeric view of ints, floats and bools (as 0 and 1).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Bool(b) => Some(*b as i64 as f64),
            Value::String(_) => None,
        }
    }

    /// The value with a bool replaced by the int 0 or 1.
    pub fn promote_bool(&self) -> Cow<'_, Value> {
        match self {
            Value::Bool(b) => Cow::Owned(Value::Int(*b as i64)),
            other => Cow::Borrowed(other),
        }
    }

    /// Interpret the value as a loop iteration count.
    ///
    /// Floats are truncated toward zero and bools count as 0 or 1.
    pub fn to_count(&self) -> Result<i64, EvalErrorKind> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Float(n) => float_to_int(*n),
            Value::Bool(b) => Ok(*b as i64),
            Value::String(s) => Err(EvalErrorKind::InvalidCount(format!("string \"{s}\""))),
        }
    }

    /// Ordering between two numbers or two strings. Bools order as numbers.
    pub fn compare(&self, other: &Value) -> Result<Ordering, EvalErrorKind> {
        match (self.promote_bool().as_ref(), other.promote_bool().as_ref()) {
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b).ok_or_else(|| {
                    EvalErrorKind::TypeError("cannot order nan".to_string())
                }),
                _ => Err(EvalErrorKind::TypeError(format!(
                    "cannot compare {} and {}",
                    self.type_name(),
                    other.type_name()
                ))),
            },
        }
    }
}

/// Truncate a float toward zero, failing when it does not fit an `i64`.
pub(crate) fn float_to_int(n: f64) -> Result<i64, EvalErrorKind> {
    if n.is_nan() {
        return Err(EvalErrorKind::MathDomain("cannot convert nan to int".to_string()));
    }
    let truncated = n.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(EvalErrorKind::Overflow);
    }
    Ok(truncated as i64)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => fmt_float(*n, f),
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
        }
    }
}

/// Floats always show a fractional part or exponent so they read as floats.
fn fmt_float(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        write!(f, "nan")
    } else if n.is_infinite() {
        write!(f, "{}", if n > 0.0 { "inf" } else { "-inf" })
    } else if n != 0.0 && (n.abs() >= 1e16 || n.abs() < 1e-4) {
        write!(f, "{:e}", n)
    } else if n.fract() == 0.0 {
        write!(f, "{:.1}", n)
    } else {
        write!(f, "{}", n)
    }
}
