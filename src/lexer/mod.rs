//! Lexing: source lines for the block parser, tokens for expressions.

pub mod lines;
pub mod scanner;
pub mod token;

pub use lines::{lex, lex_source, Aliaser, Line};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
