//! Game, scene, entity, tick, UI page and route blocks.
//!
//! None of these drive a real engine or server. Each writes a marker line
//! and then runs its body like any other block.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::ast::Stmt;
use crate::interpreter::environment::Environment;

use super::{ExecResult, Interpreter};

/// Iterations of a `tick` block.
pub const TICK_FRAMES: usize = 3;

/// Pause between `tick` iterations.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

impl<W: Write> Interpreter<W> {
    pub(crate) fn execute_game(&mut self, body: &[Stmt], env: &mut Environment) -> ExecResult<()> {
        writeln!(self.output, "🎮 Game engine started")?;
        self.execute_block(body, env)
    }

    pub(crate) fn execute_scene(&mut self, name: &str, body: &[Stmt], env: &mut Environment) -> ExecResult<()> {
        writeln!(self.output, "🗺 Scene: {}", name)?;
        self.execute_block(body, env)
    }

    pub(crate) fn execute_entity(&mut self, name: &str, body: &[Stmt], env: &mut Environment) -> ExecResult<()> {
        env.define_entity(name.to_string());
        writeln!(self.output, "👾 Entity: {}", name)?;
        self.execute_block(body, env)
    }

    pub(crate) fn execute_tick(&mut self, body: &[Stmt], env: &mut Environment) -> ExecResult<()> {
        writeln!(self.output, "⏱ Tick loop ({} frames)", TICK_FRAMES)?;

        for frame in 0..TICK_FRAMES {
            if frame > 0 {
                self.output.flush()?;
                thread::sleep(TICK_INTERVAL);
            }
            log::trace!("tick frame {}", frame + 1);
            self.execute_block(body, env)?;
        }
        Ok(())
    }

    pub(crate) fn execute_ui_page(&mut self, name: &str, body: &[Stmt], env: &mut Environment) -> ExecResult<()> {
        writeln!(self.output, "🖼 UI page: {}", name)?;
        self.execute_block(body, env)
    }

    pub(crate) fn execute_route(&mut self, path: &str, body: &[Stmt], env: &mut Environment) -> ExecResult<()> {
        writeln!(self.output, "🌐 Route: {}", path)?;
        self.execute_block(body, env)
    }
}
