//! Core block parser struct and helper methods.

use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::{Line, TokenKind};

pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser over significant source lines.
pub struct Parser {
    pub(crate) lines: Vec<Line>,
    pub(crate) strict: bool,
}

impl Parser {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            strict: false,
        }
    }

    /// Reject unrecognized lines instead of skipping them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse a complete program.
    pub fn parse(&self) -> ParseResult<Program> {
        let (statements, index) = self.parse_block(0)?;

        if let Some(stray) = self.lines.get(index) {
            return Err(ParseError::UnexpectedEnd { line: stray.number });
        }

        log::debug!("parsed {} top-level statements", statements.len());
        Ok(Program::new(statements))
    }

    /// Parse statements from `start` up to an `end` line at this depth.
    ///
    /// Returns the block and the index of that `end` line, or `lines.len()`
    /// if the input ran out first. The caller decides whether running out is
    /// an error and advances past the `end`.
    pub fn parse_block(&self, start: usize) -> ParseResult<(Vec<Stmt>, usize)> {
        let mut block = Vec::new();
        let mut index = start;

        while let Some(line) = self.lines.get(index) {
            if is_end(line) {
                return Ok((block, index));
            }

            let (stmt, next) = self.parse_statement(index)?;
            block.extend(stmt);
            index = next;
        }

        Ok((block, index))
    }

    /// Parse the nested body of the block opened at `opener`.
    ///
    /// Returns the body and the index one past its `end` line.
    pub(crate) fn block_body(&self, opener: usize, keyword: &str) -> ParseResult<(Vec<Stmt>, usize)> {
        let (body, end) = self.parse_block(opener + 1)?;

        if end >= self.lines.len() {
            return Err(ParseError::UnterminatedBlock {
                keyword: keyword.to_string(),
                line: self.lines[opener].number,
            });
        }

        Ok((body, end + 1))
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

/// A line that closes the current block.
pub(crate) fn is_end(line: &Line) -> bool {
    line.text.trim() == "end"
}

/// Split a trimmed line into its leading word and the trimmed remainder.
pub(crate) fn split_keyword(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (text, ""),
    }
}

/// Variable, data block, and field names.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    };
    valid && TokenKind::keyword(name).is_none()
}
