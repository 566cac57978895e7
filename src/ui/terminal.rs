//! Terminal setup, teardown and suspension.
//!
//! [`TerminalGuard`] owns the ratatui terminal over a crossterm backend:
//! raw mode plus the alternate screen on entry, restored on drop even when
//! the loop exits through an error. `suspend` tears the whole screen down
//! around an external interactive program (pager, editor, shell command)
//! and reinitializes it afterwards.

use crate::core::error::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout};

pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    /// Draw one frame
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Tear the screen down, run `action` with full terminal control, then
    /// reinitialize the screen.
    ///
    /// The external program blocks until it exits; there is deliberately no
    /// timeout.
    pub fn suspend<T>(&mut self, action: impl FnOnce() -> T) -> Result<T> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;

        let result = action();

        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.clear()?;

        Ok(result)
    }

    /// Restore the terminal explicitly (also performed on drop)
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // best effort: never panic in drop
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
