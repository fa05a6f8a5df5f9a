//! Bytecode compiler: lowers the statement tree to a chunk.
//!
//! Only top-level `show` and `set` statements have an instruction form.
//! Every other statement, and every statement nested inside a block, is
//! filtered out before lowering; the VM never sees it.

use crate::ast::{Program, Stmt, StmtKind};
use crate::bytecode::chunk::Chunk;
use crate::bytecode::instruction::Instruction;

/// The bytecode compiler.
#[derive(Default)]
pub struct Compiler {
    chunk: Chunk,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a program into an optimized chunk.
    pub fn compile(mut self, program: &Program) -> Chunk {
        for stmt in lowerable(&program.statements) {
            self.compile_stmt(stmt);
        }

        log::debug!("compiled {} instructions", self.chunk.len());
        optimize(self.chunk)
    }

    fn compile_stmt(&mut self, stmt: &Stmt) {
        let instruction = match &stmt.kind {
            StmtKind::Show(expr) => Instruction::Print(expr.clone()),
            StmtKind::Set { name, expr } => Instruction::Set {
                name: name.clone(),
                expr: expr.clone(),
            },
            _ => return,
        };
        self.chunk.write(instruction, stmt.line);
    }
}

/// The filter stage: top-level statements that have an instruction form.
fn lowerable(statements: &[Stmt]) -> impl Iterator<Item = &Stmt> {
    statements.iter().filter(|stmt| match stmt.kind {
        StmtKind::Show(_) | StmtKind::Set { .. } => true,
        _ => {
            let nested = stmt.body().map_or(0, <[Stmt]>::len);
            log::debug!(
                "not compiled: '{}' at line {} ({} nested statements)",
                stmt.keyword(),
                stmt.line,
                nested
            );
            false
        }
    })
}

/// Optimization pass run by `compile`. Currently the identity.
pub fn optimize(chunk: Chunk) -> Chunk {
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_source;
    use crate::parser::Parser;
    use indexmap::IndexMap;

    fn compile_source(source: &str) -> Chunk {
        let program = Parser::new(lex_source(source, &IndexMap::new()))
            .parse()
            .unwrap();
        Compiler::new().compile(&program)
    }

    #[test]
    fn test_top_level_show_and_set() {
        let chunk = compile_source("show \"Hi\"\nset x = 2\nshow x");
        assert_eq!(
            chunk.code,
            vec![
                Instruction::Print("\"Hi\"".to_string()),
                Instruction::Set {
                    name: "x".to_string(),
                    expr: "2".to_string()
                },
                Instruction::Print("x".to_string()),
            ]
        );
        assert_eq!(chunk.lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_blocks_are_dropped_with_their_bodies() {
        let chunk = compile_source(
            "set x = 1\nloop 3\n  show x\nend\nif 1\n  set y = 2\nend\ndata d\n  a = 1\nend\ngame start\nend\nshow x",
        );
        assert_eq!(chunk.len(), 2);
        assert_eq!(chunk.get_line(0), 1);
        assert_eq!(chunk.get_line(1), 13);
    }

    #[test]
    fn test_empty_program() {
        assert!(compile_source("").is_empty());
    }

    #[test]
    fn test_optimize_is_identity() {
        let chunk = compile_source("show 1 + 1\nset a = 2");
        assert_eq!(optimize(chunk.clone()), chunk);
    }
}
