//! Bytecode module for the TayoZanX VM.
//!
//! The bytecode form covers only top-level `show` and `set`; block
//! statements exist only for the tree-walking interpreter.
//!
//! # Architecture
//!
//! - `instruction`: opcodes and instructions
//! - `chunk`: instructions plus their source lines
//! - `compiler`: lowers the statement tree into a chunk
//! - `vm`: runs a chunk against its own globals
//! - `disassembler`: debug output for bytecode inspection

pub mod chunk;
pub mod compiler;
pub mod disassembler;
pub mod instruction;
pub mod vm;

pub use chunk::Chunk;
pub use compiler::{optimize, Compiler};
pub use disassembler::disassemble;
pub use instruction::{Instruction, OpCode};
pub use vm::{Globals, VM};
