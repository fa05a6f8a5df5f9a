//! Parser module for TayoZanX.
//!
//! `Parser` turns significant lines into the statement tree; `ExprParser`
//! turns one expression string into an expression tree.

mod core;
mod expressions;
mod precedence;
mod statements;


pub use self::core::{ParseResult, Parser};
pub use self::expressions::{ExprParser, ExprResult};
