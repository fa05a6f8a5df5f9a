//! Statement parsing: leaf statements, blocks, and data blocks.

use indexmap::IndexMap;

use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::Line;

use super::core::{is_end, is_identifier, split_keyword, ParseResult, Parser};

impl Parser {
    /// Parse the statement starting at `index`.
    ///
    /// Returns the statement (or `None` for a skipped unrecognized line in
    /// permissive mode) and the index of the next line to parse. For block
    /// statements that index is one past the block's `end` line.
    pub fn parse_statement(&self, index: usize) -> ParseResult<(Option<Stmt>, usize)> {
        let line = &self.lines[index];
        let (keyword, rest) = split_keyword(line.text.trim());

        let (kind, next) = match keyword {
            "show" => {
                let expr = required(line, keyword, rest, "an expression")?;
                (StmtKind::Show(expr.to_string()), index + 1)
            }
            "set" => (self.set_statement(line, rest)?, index + 1),
            "if" => {
                let condition = required(line, keyword, rest, "a condition")?.to_string();
                let (body, next) = self.block_body(index, keyword)?;
                (StmtKind::If { condition, body }, next)
            }
            "loop" => {
                let count = single_operand(line, keyword, rest, "an iteration count")?;
                let (body, next) = self.block_body(index, keyword)?;
                (StmtKind::Loop { count, body }, next)
            }
            "data" => return self.data_statement(index, rest),
            "game" if split_keyword(rest).0 == "start" => {
                no_trailing(line, "game start", split_keyword(rest).1)?;
                let (body, next) = self.block_body(index, "game start")?;
                (StmtKind::Game(body), next)
            }
            "scene" => {
                let name = single_operand(line, keyword, rest, "a scene name")?;
                let (body, next) = self.block_body(index, keyword)?;
                (StmtKind::Scene { name, body }, next)
            }
            "entity" => {
                let name = single_operand(line, keyword, rest, "an entity name")?;
                let (body, next) = self.block_body(index, keyword)?;
                (StmtKind::Entity { name, body }, next)
            }
            "tick" => {
                no_trailing(line, keyword, rest)?;
                let (body, next) = self.block_body(index, keyword)?;
                (StmtKind::Tick(body), next)
            }
            "ui" if split_keyword(rest).0 == "page" => {
                let name = single_operand(line, "ui page", split_keyword(rest).1, "a page name")?;
                let (body, next) = self.block_body(index, "ui page")?;
                (StmtKind::UiPage { name, body }, next)
            }
            "route" => {
                let path = single_operand(line, keyword, rest, "a route path")?;
                let (body, next) = self.block_body(index, keyword)?;
                (StmtKind::Route { path, body }, next)
            }
            "end" if rest.is_empty() => {
                return Err(ParseError::UnexpectedEnd { line: line.number });
            }
            _ => return self.unknown_statement(index),
        };

        Ok((Some(Stmt::new(kind, line.number)), next))
    }

    fn set_statement(&self, line: &Line, rest: &str) -> ParseResult<StmtKind> {
        let (name, expr) = rest
            .split_once('=')
            .ok_or_else(|| ParseError::MissingSeparator {
                construct: "set statement",
                text: line.text.trim().to_string(),
                line: line.number,
            })?;

        let name = valid_name(line, name.trim())?;
        let expr = required(line, "set", expr.trim(), "a value after '='")?;

        Ok(StmtKind::Set {
            name,
            expr: expr.to_string(),
        })
    }

    /// Data blocks hold `field = expr` lines instead of statements.
    fn data_statement(&self, index: usize, rest: &str) -> ParseResult<(Option<Stmt>, usize)> {
        let opener = &self.lines[index];
        let name = single_operand(opener, "data", rest, "a data block name")?;
        let name = valid_name(opener, &name)?;

        let mut fields = IndexMap::new();
        let mut cursor = index + 1;

        loop {
            let Some(line) = self.lines.get(cursor) else {
                return Err(ParseError::UnterminatedBlock {
                    keyword: "data".to_string(),
                    line: opener.number,
                });
            };
            if is_end(line) {
                break;
            }

            let text = line.text.trim();
            let (field, expr) = text.split_once('=').ok_or_else(|| ParseError::MissingSeparator {
                construct: "data field",
                text: text.to_string(),
                line: line.number,
            })?;

            let field = valid_name(line, field.trim())?;
            let expr = required(line, &field, expr.trim(), "a value after '='")?;
            fields.insert(field, expr.to_string());
            cursor += 1;
        }

        let stmt = Stmt::new(StmtKind::Data { name, fields }, opener.number);
        Ok((Some(stmt), cursor + 1))
    }

    fn unknown_statement(&self, index: usize) -> ParseResult<(Option<Stmt>, usize)> {
        let line = &self.lines[index];

        if self.strict {
            return Err(ParseError::UnknownStatement {
                text: line.text.trim().to_string(),
                line: line.number,
            });
        }

        log::warn!(
            "skipping unrecognized line {}: {}",
            line.number,
            line.text.trim()
        );
        Ok((None, index + 1))
    }
}

fn required<'t>(line: &Line, keyword: &str, text: &'t str, expected: &'static str) -> ParseResult<&'t str> {
    if text.is_empty() {
        Err(ParseError::MissingOperand {
            keyword: keyword.to_string(),
            expected,
            line: line.number,
        })
    } else {
        Ok(text)
    }
}

/// The one whitespace-delimited operand of a block opener.
fn single_operand(line: &Line, keyword: &str, rest: &str, expected: &'static str) -> ParseResult<String> {
    let (operand, trailing) = split_keyword(rest);
    let operand = required(line, keyword, operand, expected)?;
    no_trailing(line, keyword, trailing)?;
    Ok(operand.to_string())
}

fn no_trailing(line: &Line, keyword: &str, trailing: &str) -> ParseResult<()> {
    if trailing.is_empty() {
        Ok(())
    } else {
        Err(ParseError::TrailingInput {
            keyword: keyword.to_string(),
            text: trailing.to_string(),
            line: line.number,
        })
    }
}

fn valid_name(line: &Line, name: &str) -> ParseResult<String> {
    if is_identifier(name) {
        Ok(name.to_string())
    } else {
        Err(ParseError::InvalidName {
            name: name.to_string(),
            line: line.number,
        })
    }
}
