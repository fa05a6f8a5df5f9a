//! Bytecode chunk containing instructions and their source lines.

use crate::bytecode::instruction::Instruction;

/// A chunk of bytecode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    /// The instructions, in execution order.
    pub code: Vec<Instruction>,
    /// Source line of each instruction (offset -> line number).
    pub lines: Vec<usize>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction compiled from `line`.
    pub fn write(&mut self, instruction: Instruction, line: usize) {
        self.code.push(instruction);
        self.lines.push(line);
    }

    /// Get the line number for an offset.
    pub fn get_line(&self, offset: usize) -> usize {
        self.lines.get(offset).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Instructions paired with their source lines.
    pub fn iter(&self) -> impl Iterator<Item = (&Instruction, usize)> + '_ {
        self.code.iter().zip(self.lines.iter().copied())
    }
}
