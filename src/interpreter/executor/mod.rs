//! Tree-walking interpreter for TayoZanX.

mod statements;
mod world;

#[cfg(test)]
mod tests;

use std::io::{self, Stdout, Write};

use crate::ast::*;
use crate::error::TayoError;
use crate::eval::{self, Value};
use crate::interpreter::environment::Environment;

pub(crate) type ExecResult<T> = Result<T, TayoError>;

/// The TayoZanX interpreter.
///
/// Writes program output and engine markers to `W`, stdout by default. The
/// environment is not part of the interpreter: each run gets one, and it is
/// handed down by reference to every statement.
pub struct Interpreter<W: Write = Stdout> {
    pub(crate) output: W,
}

impl Interpreter<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(output: W) -> Self {
        Self { output }
    }

    /// Run a whole program in a fresh environment.
    pub fn run(&mut self, program: &Program) -> ExecResult<()> {
        self.run_in(program, &mut Environment::new())
    }

    /// Run a whole program against an existing environment.
    pub fn run_in(&mut self, program: &Program, env: &mut Environment) -> ExecResult<()> {
        let result = self.execute_block(&program.statements, env);
        self.output.flush()?;
        result
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub(crate) fn execute_block(&mut self, statements: &[Stmt], env: &mut Environment) -> ExecResult<()> {
        for stmt in statements {
            self.execute(stmt, env)?;
        }
        Ok(())
    }
}

/// Evaluate an expression, tagging failures with the statement's line.
pub(crate) fn evaluate(text: &str, env: &Environment, line: usize) -> ExecResult<Value> {
    eval::evaluate(text, env).map_err(|e| e.at_line(line).into())
}
