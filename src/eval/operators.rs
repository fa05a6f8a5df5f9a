//! Binary and unary operator evaluation.

use std::cmp::Ordering;

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::EvalErrorKind;

use super::value::Value;
use super::{EvalResult, Evaluator};

/// Largest string, in bytes, that `*` may build by repetition.
pub(crate) const MAX_STRING_LEN: usize = 1 << 24;

impl Evaluator<'_> {
    /// Bools take part in arithmetic as the ints 0 and 1, except next to a
    /// string, where `+` concatenates their text.
    pub(crate) fn eval_binary(&self, left: &Value, op: BinaryOp, right: &Value) -> EvalResult<Value> {
        if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
            return self.eval_promoted(left, op, right);
        }
        self.eval_promoted(&left.promote_bool(), op, &right.promote_bool())
    }

    fn eval_promoted(&self, left: &Value, op: BinaryOp, right: &Value) -> EvalResult<Value> {
        match op {
            BinaryOp::Add => self.eval_add(left, right),
            BinaryOp::Subtract => self.eval_subtract(left, right),
            BinaryOp::Multiply => self.eval_multiply(left, right),
            BinaryOp::Divide => self.eval_divide(left, right),
            BinaryOp::FloorDivide => self.eval_floor_divide(left, right),
            BinaryOp::Modulo => self.eval_modulo(left, right),
            BinaryOp::Power => self.eval_power(left, right),
            BinaryOp::Equal => Ok(Value::Bool(left == right)),
            BinaryOp::NotEqual => Ok(Value::Bool(left != right)),
            BinaryOp::Less => compare(left, right, Ordering::is_lt),
            BinaryOp::LessEqual => compare(left, right, Ordering::is_le),
            BinaryOp::Greater => compare(left, right, Ordering::is_gt),
            BinaryOp::GreaterEqual => compare(left, right, Ordering::is_ge),
        }
    }

    fn eval_add(&self, left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => a.checked_add(*b).map(Value::Int).ok_or(EvalErrorKind::Overflow),
            (Value::String(a), b) => Ok(Value::String(format!("{}{}", a, b))),
            (a, Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            _ => float_op(left, right, "add", |a, b| a + b),
        }
    }

    fn eval_subtract(&self, left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => a.checked_sub(*b).map(Value::Int).ok_or(EvalErrorKind::Overflow),
            _ => float_op(left, right, "subtract", |a, b| a - b),
        }
    }

    fn eval_multiply(&self, left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => a.checked_mul(*b).map(Value::Int).ok_or(EvalErrorKind::Overflow),
            (Value::String(s), Value::Int(n)) | (Value::Int(n), Value::String(s)) => {
                let times = usize::try_from(*n).unwrap_or(0);
                match s.len().checked_mul(times) {
                    Some(len) if len <= MAX_STRING_LEN => Ok(Value::String(s.repeat(times))),
                    _ => Err(EvalErrorKind::Overflow),
                }
            }
            _ => float_op(left, right, "multiply", |a, b| a * b),
        }
    }

    /// True division always yields a float.
    fn eval_divide(&self, left: &Value, right: &Value) -> EvalResult<Value> {
        let (a, b) = numbers(left, right, "divide")?;
        if b == 0.0 {
            return Err(EvalErrorKind::DivisionByZero);
        }
        Ok(Value::Float(a / b))
    }

    fn eval_floor_divide(&self, left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(_), Value::Int(0)) => Err(EvalErrorKind::DivisionByZero),
            (Value::Int(a), Value::Int(b)) => {
                let quotient = a.checked_div(*b).ok_or(EvalErrorKind::Overflow)?;
                if a % b != 0 && (*a < 0) != (*b < 0) {
                    Ok(Value::Int(quotient - 1))
                } else {
                    Ok(Value::Int(quotient))
                }
            }
            _ => {
                let (a, b) = numbers(left, right, "floor-divide")?;
                if b == 0.0 {
                    return Err(EvalErrorKind::DivisionByZero);
                }
                Ok(Value::Float((a / b).floor()))
            }
        }
    }

    /// The remainder takes the sign of the divisor.
    fn eval_modulo(&self, left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(_), Value::Int(0)) => Err(EvalErrorKind::DivisionByZero),
            (Value::Int(a), Value::Int(b)) => {
                let remainder = a.wrapping_rem(*b);
                if remainder != 0 && (remainder < 0) != (*b < 0) {
                    Ok(Value::Int(remainder + b))
                } else {
                    Ok(Value::Int(remainder))
                }
            }
            _ => {
                let (a, b) = numbers(left, right, "modulo")?;
                if b == 0.0 {
                    return Err(EvalErrorKind::DivisionByZero);
                }
                let remainder = a % b;
                if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
                    Ok(Value::Float(remainder + b))
                } else {
                    Ok(Value::Float(remainder))
                }
            }
        }
    }

    fn eval_power(&self, left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(base), Value::Int(exp)) if *exp >= 0 => {
                let exp = u32::try_from(*exp).map_err(|_| EvalErrorKind::Overflow)?;
                base.checked_pow(exp).map(Value::Int).ok_or(EvalErrorKind::Overflow)
            }
            _ => {
                let (base, exp) = numbers(left, right, "raise")?;
                if base == 0.0 && exp < 0.0 {
                    return Err(EvalErrorKind::DivisionByZero);
                }
                if base < 0.0 && exp.fract() != 0.0 {
                    return Err(EvalErrorKind::MathDomain("**".to_string()));
                }
                let result = base.powf(exp);
                if result.is_infinite() && base.is_finite() && exp.is_finite() {
                    return Err(EvalErrorKind::Overflow);
                }
                Ok(Value::Float(result))
            }
        }
    }

    pub(crate) fn eval_unary(&self, op: UnaryOp, operand: Value) -> EvalResult<Value> {
        match op {
            UnaryOp::Negate => match operand {
                Value::Int(n) => n.checked_neg().map(Value::Int).ok_or(EvalErrorKind::Overflow),
                Value::Float(n) => Ok(Value::Float(-n)),
                Value::Bool(b) => Ok(Value::Int(-(b as i64))),
                _ => Err(EvalErrorKind::TypeError(format!(
                    "cannot negate {}",
                    operand.type_name()
                ))),
            },
            UnaryOp::Plus => match operand {
                Value::Int(_) | Value::Float(_) => Ok(operand),
                Value::Bool(b) => Ok(Value::Int(b as i64)),
                _ => Err(EvalErrorKind::TypeError(format!(
                    "bad operand for unary +: {}",
                    operand.type_name()
                ))),
            },
            UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        }
    }
}

fn compare(left: &Value, right: &Value, test: fn(Ordering) -> bool) -> EvalResult<Value> {
    left.compare(right).map(|ordering| Value::Bool(test(ordering)))
}

fn numbers(left: &Value, right: &Value, verb: &str) -> EvalResult<(f64, f64)> {
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(EvalErrorKind::TypeError(format!(
            "cannot {} {} and {}",
            verb,
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn float_op(left: &Value, right: &Value, verb: &str, op: fn(f64, f64) -> f64) -> EvalResult<Value> {
    let (a, b) = numbers(left, right, verb)?;
    Ok(Value::Float(op(a, b)))
}
