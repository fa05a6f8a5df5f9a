//! Bytecode disassembler for debugging.

use crate::bytecode::chunk::Chunk;
use crate::bytecode::instruction::Instruction;

/// Disassemble a chunk into human-readable output.
pub fn disassemble(chunk: &Chunk) -> String {
    let mut output = String::from("== <script> ==\n");
    for offset in 0..chunk.len() {
        disassemble_instruction(chunk, offset, &mut output);
    }
    output
}

/// Disassemble a single instruction.
///
/// Columns: offset, source line (`|` when unchanged from the previous
/// instruction), opcode, operands.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize, output: &mut String) {
    let line = chunk.get_line(offset);
    let line_column = if offset > 0 && line == chunk.get_line(offset - 1) {
        "   |".to_string()
    } else {
        format!("{:4}", line)
    };

    let Some(instruction) = chunk.code.get(offset) else {
        return;
    };
    let operands = match instruction {
        Instruction::Print(expr) => format!("'{}'", expr),
        Instruction::Set { name, expr } => format!("{} '{}'", name, expr),
    };

    output.push_str(&format!(
        "{:04} {} {:<6} {}\n",
        offset,
        line_column,
        instruction.opcode().name(),
        operands
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble() {
        let mut chunk = Chunk::new();
        chunk.write(Instruction::Print("\"Hi\"".to_string()), 1);
        chunk.write(
            Instruction::Set {
                name: "x".to_string(),
                expr: "2 * 3".to_string(),
            },
            4,
        );

        assert_eq!(
            disassemble(&chunk),
            "== <script> ==\n0000    1 PRINT  '\"Hi\"'\n0001    4 SET    x '2 * 3'\n"
        );
    }

    #[test]
    fn test_repeated_line_shows_bar() {
        let mut chunk = Chunk::new();
        chunk.write(Instruction::Print("1".to_string()), 2);
        chunk.write(Instruction::Print("2".to_string()), 2);

        let mut output = String::new();
        disassemble_instruction(&chunk, 1, &mut output);
        assert_eq!(output, "0001    | PRINT  '2'\n");
    }

    #[test]
    fn test_empty_chunk() {
        assert_eq!(disassemble(&Chunk::new()), "== <script> ==\n");
    }
}
