//! Expression evaluation shared by the interpreter and the VM.
//!
//! Expressions stay as source text in both the statement tree and the
//! bytecode. They are scanned, parsed and evaluated on demand against a
//! [`Bindings`] backend, so variable references resolve through a real
//! lookup rather than text substitution.

mod math;
mod operators;
pub mod value;

pub use value::Value;

use crate::ast::*;
use crate::error::{EvalError, EvalErrorKind};
use crate::parser::ExprParser;

type EvalResult<T> = Result<T, EvalErrorKind>;

/// Where an expression looks up the names it references.
pub trait Bindings {
    /// Value of a plain variable.
    fn lookup(&self, name: &str) -> Option<Value>;

    /// Value of `record.field`. Backends without records keep the default.
    fn lookup_field(&self, _record: &str, _field: &str) -> Option<Value> {
        None
    }
}

/// Evaluate one expression string.
///
/// A double-quoted literal with no quote inside is returned as-is without
/// scanning, escapes included. Text that starts and ends with `"` but does not
/// scan or parse (`"say "hi""`) is also taken literally, between the outer
/// quotes.
pub fn evaluate(text: &str, bindings: &dyn Bindings) -> Result<Value, EvalError> {
    let text = text.trim();

    if let Some(literal) = quoted(text).filter(|inner| !inner.contains('"')) {
        return Ok(Value::String(literal.to_string()));
    }

    let expr = match ExprParser::parse_source(text) {
        Ok(expr) => expr,
        Err(err) => {
            return match quoted(text) {
                Some(literal) => Ok(Value::String(literal.to_string())),
                None => Err(EvalError::new(err, text)),
            };
        }
    };

    Evaluator::new(bindings)
        .eval(&expr)
        .map_err(|kind| EvalError::new(kind, text))
}

fn quoted(text: &str) -> Option<&str> {
    text.strip_prefix('"')?.strip_suffix('"')
}

/// Tree-walking evaluator over a parsed expression.
pub struct Evaluator<'b> {
    bindings: &'b dyn Bindings,
}

impl<'b> Evaluator<'b> {
    pub fn new(bindings: &'b dyn Bindings) -> Self {
        Self { bindings }
    }

    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::IntLiteral(n) => Ok(Value::Int(*n)),
            ExprKind::FloatLiteral(n) => Ok(Value::Float(*n)),
            ExprKind::StringLiteral(s) => Ok(Value::String(s.clone())),
            ExprKind::BoolLiteral(b) => Ok(Value::Bool(*b)),
            ExprKind::Variable(name) => self.variable(name),
            ExprKind::Member { object, field } => self
                .bindings
                .lookup_field(object, field)
                .ok_or_else(|| EvalErrorKind::UndefinedField {
                    record: object.clone(),
                    field: field.clone(),
                }),
            ExprKind::Grouping(inner) => self.eval(inner),
            ExprKind::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.eval_binary(&left, *operator, &right)
            }
            ExprKind::Unary { operator, operand } => {
                let operand = self.eval(operand)?;
                self.eval_unary(*operator, operand)
            }
            ExprKind::Comparison { first, rest } => {
                let mut left = self.eval(first)?;
                for (operator, operand) in rest {
                    let right = self.eval(operand)?;
                    if !self.eval_binary(&left, *operator, &right)?.is_truthy() {
                        return Ok(Value::Bool(false));
                    }
                    left = right;
                }
                Ok(Value::Bool(true))
            }
            ExprKind::LogicalAnd { left, right } => {
                let left = self.eval(left)?;
                if left.is_truthy() {
                    self.eval(right)
                } else {
                    Ok(left)
                }
            }
            ExprKind::LogicalOr { left, right } => {
                let left = self.eval(left)?;
                if left.is_truthy() {
                    Ok(left)
                } else {
                    self.eval(right)
                }
            }
            ExprKind::Call { callee, arguments } => {
                let args = arguments
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<EvalResult<Vec<_>>>()?;
                math::call(callee, &args)
            }
        }
    }

    /// Program variables shadow the math constants.
    fn variable(&self, name: &str) -> EvalResult<Value> {
        self.bindings
            .lookup(name)
            .or_else(|| math::constant(name))
            .ok_or_else(|| EvalErrorKind::UndefinedVariable(name.to_string()))
    }
}
