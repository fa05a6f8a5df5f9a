//! TayoZanX: a small line-oriented scripting language.
//!
//! This is the library root that exports all modules.
//!
//! # Execution Modes
//!
//! A script can run in two ways:
//! - **Tree-walk interpreter**: runs every statement, blocks included
//! - **Bytecode VM**: compiles top-level `show`/`set` and runs only those
//!
//! `Both` runs the interpreter and then the VM on the same source, each
//! with its own variables.

#![allow(clippy::result_large_err)]
#![allow(clippy::new_without_default)]

pub mod ast;
pub mod bytecode;
pub mod config;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod span;

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use ast::Program;
use bytecode::Chunk;
use config::Config;
use error::TayoError;

pub use bytecode::disassemble;

/// Execution mode for running TayoZanX programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Tree-walking interpreter
    TreeWalk,
    /// Bytecode virtual machine
    Bytecode,
    /// Interpreter first, then the VM
    #[default]
    Both,
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(ExecutionMode::TreeWalk),
            "vm" => Ok(ExecutionMode::Bytecode),
            "both" => Ok(ExecutionMode::Both),
            other => Err(format!("unknown mode '{}' (expected tree, vm or both)", other)),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExecutionMode::TreeWalk => "tree",
            ExecutionMode::Bytecode => "vm",
            ExecutionMode::Both => "both",
        })
    }
}

/// Run a program from source code with the default config and mode.
pub fn run(source: &str) -> Result<(), TayoError> {
    run_with_options(source, &Config::default(), ExecutionMode::default(), false)
}

/// Run a program with full control over execution options, writing to stdout.
pub fn run_with_options(
    source: &str,
    config: &Config,
    mode: ExecutionMode,
    disassemble: bool,
) -> Result<(), TayoError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(source, config, mode, disassemble, &mut out)
}

/// Run a program, writing all output to `out`.
pub fn run_with_output<W: Write>(
    source: &str,
    config: &Config,
    mode: ExecutionMode,
    disassemble: bool,
    out: &mut W,
) -> Result<(), TayoError> {
    let program = parse(source, config)?;

    match mode {
        ExecutionMode::TreeWalk => run_tree(&program, out),
        ExecutionMode::Bytecode => run_vm(&program, disassemble, out),
        ExecutionMode::Both => {
            writeln!(out, "▶ Interpreter")?;
            run_tree(&program, out)?;
            writeln!(out, "\n▶ Compiler/VM")?;
            run_vm(&program, disassemble, out)
        }
    }
}

fn run_tree<W: Write>(program: &Program, out: &mut W) -> Result<(), TayoError> {
    interpreter::Interpreter::with_output(out).run(program)
}

fn run_vm<W: Write>(program: &Program, disassemble: bool, out: &mut W) -> Result<(), TayoError> {
    let chunk = bytecode::Compiler::new().compile(program);

    if disassemble {
        write!(out, "{}", bytecode::disassemble(&chunk))?;
        writeln!(out, "---")?;
    }

    bytecode::VM::with_output(out).run(&chunk)
}

/// Run a script file. The extension is checked before anything is read.
pub fn run_file(
    path: &Path,
    config: &Config,
    mode: ExecutionMode,
    disassemble: bool,
) -> Result<(), TayoError> {
    let source = read_script(path, config)?;
    run_with_options(&source, config, mode, disassemble)
}

/// Check a script's extension and read it.
pub fn read_script(path: &Path, config: &Config) -> Result<String, TayoError> {
    if !config.has_valid_extension(path) {
        return Err(TayoError::InvalidFileType {
            path: path.display().to_string(),
            expected: config.extensions.clone(),
        });
    }

    let source = std::fs::read_to_string(path)?;
    log::debug!("read {} bytes from {}", source.len(), path.display());
    Ok(source)
}

/// Lex and parse source into a program.
pub fn parse(source: &str, config: &Config) -> Result<Program, TayoError> {
    let lines = lexer::lex_source(source, &config.aliases);
    let program = parser::Parser::new(lines).strict(config.strict).parse()?;
    Ok(program)
}

/// Parse and compile source into an optimized chunk.
pub fn compile(source: &str, config: &Config) -> Result<Chunk, TayoError> {
    let program = parse(source, config)?;
    Ok(bytecode::Compiler::new().compile(&program))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("tree".parse::<ExecutionMode>(), Ok(ExecutionMode::TreeWalk));
        assert_eq!("vm".parse::<ExecutionMode>(), Ok(ExecutionMode::Bytecode));
        assert_eq!("both".parse::<ExecutionMode>(), Ok(ExecutionMode::Both));
        assert!("fast".parse::<ExecutionMode>().is_err());
        assert_eq!(ExecutionMode::default().to_string(), "both");
    }
}
