//! Interpreter module for TayoZanX.

pub mod environment;
pub mod executor;

pub use environment::{Environment, Record};
pub use executor::Interpreter;
