//! Bytecode instruction definitions for the TayoZanX VM.

use std::fmt;

/// Opcodes for the bytecode virtual machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    /// Evaluate an expression and print it: PRINT <expr>
    Print,
    /// Evaluate an expression and bind it: SET <name> <expr>
    Set,
}

impl OpCode {
    pub fn name(self) -> &'static str {
        match self {
            OpCode::Print => "PRINT",
            OpCode::Set => "SET",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One instruction. Expressions stay as source text and are evaluated when
/// the instruction runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Print(String),
    Set { name: String, expr: String },
}

impl Instruction {
    pub fn opcode(&self) -> OpCode {
        match self {
            Instruction::Print(_) => OpCode::Print,
            Instruction::Set { .. } => OpCode::Set,
        }
    }
}
