//! Math functions and constants available to expressions.

use std::cmp::Ordering;

use crate::error::EvalErrorKind;

use super::value::{float_to_int, Value};
use super::EvalResult;

pub(crate) fn constant(name: &str) -> Option<Value> {
    let value = match name {
        "pi" => std::f64::consts::PI,
        "e" => std::f64::consts::E,
        "tau" => std::f64::consts::TAU,
        "inf" => f64::INFINITY,
        _ => return None,
    };
    Some(Value::Float(value))
}

pub(crate) fn call(name: &str, args: &[Value]) -> EvalResult<Value> {
    match name {
        "sqrt" => unary_domain(name, args, |x| x >= 0.0, f64::sqrt),
        "sin" => unary_float(name, args, f64::sin),
        "cos" => unary_float(name, args, f64::cos),
        "tan" => unary_float(name, args, f64::tan),
        "asin" => unary_domain(name, args, |x| (-1.0..=1.0).contains(&x), f64::asin),
        "acos" => unary_domain(name, args, |x| (-1.0..=1.0).contains(&x), f64::acos),
        "atan" => unary_float(name, args, f64::atan),
        "exp" => unary_float(name, args, f64::exp),
        "log10" => unary_domain(name, args, |x| x > 0.0, f64::log10),
        "log2" => unary_domain(name, args, |x| x > 0.0, f64::log2),
        "fabs" => unary_float(name, args, f64::abs),
        "degrees" => unary_float(name, args, f64::to_degrees),
        "radians" => unary_float(name, args, f64::to_radians),
        "atan2" => {
            let [y, x] = arity::<2>(name, args, "2")?;
            Ok(Value::Float(number(name, y)?.atan2(number(name, x)?)))
        }
        "hypot" => {
            let [x, y] = arity::<2>(name, args, "2")?;
            Ok(Value::Float(number(name, x)?.hypot(number(name, y)?)))
        }
        "log" => log(args),
        "pow" => pow(args),
        "floor" => to_int(name, args, f64::floor),
        "ceil" => to_int(name, args, f64::ceil),
        "trunc" => to_int(name, args, f64::trunc),
        "abs" => {
            let [x] = arity::<1>(name, args, "1")?;
            match x {
                Value::Int(n) => n.checked_abs().map(Value::Int).ok_or(EvalErrorKind::Overflow),
                other => Ok(Value::Float(number(name, other)?.abs())),
            }
        }
        "min" => extreme(name, args, Ordering::Less),
        "max" => extreme(name, args, Ordering::Greater),
        "round" => round(args),
        "int" => {
            let [x] = arity::<1>(name, args, "1")?;
            int(x)
        }
        "float" => {
            let [x] = arity::<1>(name, args, "1")?;
            float(x)
        }
        "str" => {
            let [x] = arity::<1>(name, args, "1")?;
            Ok(Value::String(x.to_string()))
        }
        "len" => {
            let [x] = arity::<1>(name, args, "1")?;
            match x {
                Value::String(s) => Ok(Value::Int(s.chars().count() as i64)),
                other => Err(EvalErrorKind::TypeError(format!(
                    "len() expects a string, got {}",
                    other.type_name()
                ))),
            }
        }
        _ => Err(EvalErrorKind::UnknownFunction(name.to_string())),
    }
}

fn arity<'a, const N: usize>(
    name: &str,
    args: &'a [Value],
    expected: &'static str,
) -> EvalResult<&'a [Value; N]> {
    args.try_into().map_err(|_| EvalErrorKind::WrongArity {
        function: name.to_string(),
        expected,
        got: args.len(),
    })
}

fn number(name: &str, value: &Value) -> EvalResult<f64> {
    value.as_f64().ok_or_else(|| {
        EvalErrorKind::TypeError(format!(
            "{}() expects a number, got {}",
            name,
            value.type_name()
        ))
    })
}

fn unary_float(name: &str, args: &[Value], f: fn(f64) -> f64) -> EvalResult<Value> {
    let [x] = arity::<1>(name, args, "1")?;
    let x = number(name, x)?;
    finite(name, x, f(x))
}

fn unary_domain(name: &str, args: &[Value], domain: fn(f64) -> bool, f: fn(f64) -> f64) -> EvalResult<Value> {
    let [x] = arity::<1>(name, args, "1")?;
    let x = number(name, x)?;
    if !domain(x) {
        return Err(EvalErrorKind::MathDomain(name.to_string()));
    }
    finite(name, x, f(x))
}

/// A finite input must not produce an infinite or nan result.
fn finite(name: &str, input: f64, result: f64) -> EvalResult<Value> {
    if input.is_finite() && result.is_infinite() {
        Err(EvalErrorKind::Overflow)
    } else if !input.is_nan() && result.is_nan() {
        Err(EvalErrorKind::MathDomain(name.to_string()))
    } else {
        Ok(Value::Float(result))
    }
}

fn log(args: &[Value]) -> EvalResult<Value> {
    let (x, base) = match args {
        [x] => (number("log", x)?, None),
        [x, base] => (number("log", x)?, Some(number("log", base)?)),
        _ => {
            return Err(EvalErrorKind::WrongArity {
                function: "log".to_string(),
                expected: "1 or 2",
                got: args.len(),
            })
        }
    };

    if x <= 0.0 {
        return Err(EvalErrorKind::MathDomain("log".to_string()));
    }
    match base {
        None => Ok(Value::Float(x.ln())),
        Some(base) if base <= 0.0 => Err(EvalErrorKind::MathDomain("log".to_string())),
        Some(base) if base == 1.0 => Err(EvalErrorKind::DivisionByZero),
        Some(base) => Ok(Value::Float(x.ln() / base.ln())),
    }
}

fn pow(args: &[Value]) -> EvalResult<Value> {
    let [base, exp] = arity::<2>("pow", args, "2")?;
    let (base, exp) = (number("pow", base)?, number("pow", exp)?);

    if (base == 0.0 && exp < 0.0) || (base < 0.0 && base.is_finite() && exp.fract() != 0.0) {
        return Err(EvalErrorKind::MathDomain("pow".to_string()));
    }
    let result = base.powf(exp);
    if result.is_infinite() && base.is_finite() && exp.is_finite() {
        return Err(EvalErrorKind::Overflow);
    }
    Ok(Value::Float(result))
}

fn to_int(name: &str, args: &[Value], f: fn(f64) -> f64) -> EvalResult<Value> {
    let [x] = arity::<1>(name, args, "1")?;
    match x {
        Value::Int(n) => Ok(Value::Int(*n)),
        other => float_to_int(f(number(name, other)?)).map(Value::Int),
    }
}

fn extreme(name: &str, args: &[Value], wanted: Ordering) -> EvalResult<Value> {
    let (first, rest) = args.split_first().ok_or_else(|| EvalErrorKind::WrongArity {
        function: name.to_string(),
        expected: "at least 1",
        got: 0,
    })?;

    let mut best = first;
    for candidate in rest {
        if candidate.compare(best)? == wanted {
            best = candidate;
        }
    }
    Ok(best.clone())
}

/// Half-to-even rounding; an integer without `ndigits`, a float with it.
fn round(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Int(n)] => Ok(Value::Int(*n)),
        [x] => float_to_int(number("round", x)?.round_ties_even()).map(Value::Int),
        [x, digits] => {
            let Value::Int(digits) = digits else {
                return Err(EvalErrorKind::TypeError(format!(
                    "round() digits must be an int, got {}",
                    digits.type_name()
                )));
            };
            let x = number("round", x)?;
            let scale = 10f64.powi((*digits).clamp(-308, 308) as i32);
            let rounded = (x * scale).round_ties_even() / scale;
            Ok(Value::Float(if rounded.is_finite() { rounded } else { x }))
        }
        _ => Err(EvalErrorKind::WrongArity {
            function: "round".to_string(),
            expected: "1 or 2",
            got: args.len(),
        }),
    }
}

fn int(value: &Value) -> EvalResult<Value> {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(n) => float_to_int(*n).map(Value::Int),
        Value::Bool(b) => Ok(Value::Int(*b as i64)),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Value::Int)
            .map_err(|_| EvalErrorKind::TypeError(format!("invalid literal for int(): '{s}'"))),
    }
}

fn float(value: &Value) -> EvalResult<Value> {
    match value {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(n) => Ok(Value::Float(*n)),
        Value::Bool(b) => Ok(Value::Float(*b as i64 as f64)),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Value::Float)
            .map_err(|_| EvalErrorKind::TypeError(format!("could not convert string to float: '{s}'"))),
    }
}
