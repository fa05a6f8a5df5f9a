//! Virtual machine for executing compiled chunks.

use std::collections::HashMap;
use std::io::{self, Stdout, Write};

use crate::bytecode::chunk::Chunk;
use crate::bytecode::instruction::Instruction;
use crate::error::TayoError;
use crate::eval::{self, Bindings, Value};

pub type VMResult<T> = Result<T, TayoError>;

/// The VM's variable table. Never shared with the interpreter.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    values: HashMap<String, Value>,
}

impl Globals {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Chunks carry no data blocks, so `record.field` never resolves here.
impl Bindings for Globals {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }
}

/// The bytecode virtual machine.
pub struct VM<W: Write = Stdout> {
    globals: Globals,
    output: W,
}

impl VM<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for VM<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> VM<W> {
    pub fn with_output(output: W) -> Self {
        Self {
            globals: Globals::default(),
            output,
        }
    }

    /// Run a chunk against fresh globals.
    pub fn run(&mut self, chunk: &Chunk) -> VMResult<()> {
        self.globals = Globals::default();
        let result = self.execute(chunk);
        self.output.flush()?;
        result
    }

    /// Main execution loop.
    fn execute(&mut self, chunk: &Chunk) -> VMResult<()> {
        for (ip, (instruction, line)) in chunk.iter().enumerate() {
            log::trace!("{:04} {}", ip, instruction.opcode());

            match instruction {
                Instruction::Print(expr) => {
                    let value = self.evaluate(expr, line)?;
                    writeln!(self.output, "{}", value)?;
                }
                Instruction::Set { name, expr } => {
                    let value = self.evaluate(expr, line)?;
                    self.globals.set(name.clone(), value);
                }
            }
        }

        log::debug!("vm finished with {} globals", self.globals.len());
        Ok(())
    }

    fn evaluate(&self, expr: &str, line: usize) -> VMResult<Value> {
        eval::evaluate(expr, &self.globals).map_err(|e| e.at_line(line).into())
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
