//! Statement execution.

use std::io::Write;

use crate::ast::*;
use crate::error::EvalError;
use crate::interpreter::environment::{Environment, Record};

use super::{evaluate, ExecResult, Interpreter};

impl<W: Write> Interpreter<W> {
    /// Execute a statement.
    pub(crate) fn execute(&mut self, stmt: &Stmt, env: &mut Environment) -> ExecResult<()> {
        match &stmt.kind {
            StmtKind::Show(expr) => {
                let value = evaluate(expr, env, stmt.line)?;
                writeln!(self.output, "{}", value)?;
                Ok(())
            }

            StmtKind::Set { name, expr } => {
                let value = evaluate(expr, env, stmt.line)?;
                env.define(name.clone(), value);
                Ok(())
            }

            StmtKind::If { condition, body } => {
                if evaluate(condition, env, stmt.line)?.is_truthy() {
                    self.execute_block(body, env)?;
                }
                Ok(())
            }

            StmtKind::Loop { count, body } => self.execute_loop(count, body, stmt.line, env),

            StmtKind::Data { name, fields } => {
                let mut record = Record::new();
                for (field, expr) in fields {
                    record.insert(field.clone(), evaluate(expr, env, stmt.line)?);
                }
                env.define_data(name.clone(), record);
                Ok(())
            }

            StmtKind::Game(body) => self.execute_game(body, env),
            StmtKind::Scene { name, body } => self.execute_scene(name, body, env),
            StmtKind::Entity { name, body } => self.execute_entity(name, body, env),
            StmtKind::Tick(body) => self.execute_tick(body, env),
            StmtKind::UiPage { name, body } => self.execute_ui_page(name, body, env),
            StmtKind::Route { path, body } => self.execute_route(path, body, env),
        }
    }

    /// The count is evaluated once; the body sees its own earlier mutations.
    fn execute_loop(&mut self, count: &str, body: &[Stmt], line: usize, env: &mut Environment) -> ExecResult<()> {
        let times = evaluate(count, env, line)?
            .to_count()
            .map_err(|kind| EvalError::new(kind, count.trim()).at_line(line))?;

        for _ in 0..times.max(0) {
            self.execute_block(body, env)?;
        }
        Ok(())
    }
}
