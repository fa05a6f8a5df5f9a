//! Abstract Syntax Tree for TayoZanX.
//!
//! Statements form the block tree produced by the line parser and keep their
//! expressions as raw text. `expr` holds the tree the expression parser builds
//! from that text at evaluation time.

pub mod expr;
pub mod stmt;

pub use expr::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use stmt::{Program, Stmt, StmtKind};
