//! The interactive event loop.
//!
//! Single-threaded and cooperative: one poll-with-timeout per iteration so
//! the interrupt flag is observed promptly even without input. Mutating
//! actions run against the backend and are followed by an unconditional
//! store rebuild; external interactive programs run inside a terminal
//! suspension. At most one mutation is ever in flight by construction —
//! nothing proceeds until the action returns.

use crate::core::entries::{Category, ItemEntry};
use crate::core::error::Result;
use crate::core::external;
use crate::core::git::GitRepo;
use crate::core::output::print_info;
use crate::ui::input::{self, Outcome, UiAction};
use crate::ui::render;
use crate::ui::state::AppState;
use crate::ui::terminal::TerminalGuard;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Poll timeout; bounds how long an interrupt can go unnoticed
const POLL_INTERVAL: Duration = Duration::from_millis(150);

/// Why the event loop ended
enum LoopExit {
    /// User quit or interrupt observed
    Quit,
    /// The working tree became clean mid-session
    Clean,
}

/// Whether the store still has entries after a refresh
#[derive(PartialEq)]
enum Refresh {
    Populated,
    Empty,
}

/// Bulk operations over marked entries, dispatched per category
#[derive(Clone, Copy, PartialEq)]
enum BulkAction {
    Stage,
    Unstage,
}

pub struct App {
    repo: GitRepo,
    state: AppState,
    interrupt: Arc<AtomicBool>,
}

impl App {
    pub fn new(repo: GitRepo) -> Self {
        Self {
            repo,
            state: AppState::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cancellation flag consulted on every loop iteration
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Run the interactive session to completion.
    ///
    /// A clean working tree is a terminal "nothing to do" condition, both
    /// at startup and whenever a mutation empties the list.
    pub fn run(&mut self) -> Result<()> {
        let snapshot = self.repo.query_status()?;
        if snapshot.is_empty() {
            print_info("No entries found");
            return Ok(());
        }
        self.state.rebuild(&snapshot);
        self.state.select_first();

        let mut guard = TerminalGuard::new()?;
        let exit = self.event_loop(&mut guard);
        guard.restore()?;

        match exit? {
            LoopExit::Quit => Ok(()),
            LoopExit::Clean => {
                print_info("No entries found");
                Ok(())
            }
        }
    }

    fn event_loop(&mut self, guard: &mut TerminalGuard) -> Result<LoopExit> {
        loop {
            if self.interrupt.load(Ordering::Relaxed) {
                log::debug!("interrupt observed, leaving event loop");
                return Ok(LoopExit::Quit);
            }

            guard.draw(|frame| render::draw(frame, &self.state))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };

            match input::route(&mut self.state, &key) {
                Outcome::Continue => {}
                Outcome::Quit => return Ok(LoopExit::Quit),
                Outcome::Action(action) => {
                    if self.perform(guard, action)? == Refresh::Empty {
                        return Ok(LoopExit::Clean);
                    }
                }
            }
        }
    }

    /// Run one backend or external action, then refresh the store.
    fn perform(&mut self, guard: &mut TerminalGuard, action: UiAction) -> Result<Refresh> {
        match action {
            UiAction::Stage => {
                let Some(entry) = self.state.selected_entry().cloned() else {
                    return Ok(Refresh::Populated);
                };
                if let Err(e) = self.repo.stage(&entry.path) {
                    self.state.set_status(e.to_string());
                    return Ok(Refresh::Populated);
                }
                self.refresh()
            }
            UiAction::Unstage => {
                let Some(entry) = self.state.selected_entry().cloned() else {
                    return Ok(Refresh::Populated);
                };
                if !self.unstage_entry(guard, &entry)? {
                    return Ok(Refresh::Populated);
                }
                self.refresh()
            }
            UiAction::BulkStage => self.apply_to_marked(guard, BulkAction::Stage),
            UiAction::BulkUnstage => self.apply_to_marked(guard, BulkAction::Unstage),
            UiAction::Checkout => {
                let Some(entry) = self.state.selected_entry().cloned() else {
                    return Ok(Refresh::Populated);
                };
                // untracked files have nothing to reset to
                if entry.category == Category::Untracked {
                    return Ok(Refresh::Populated);
                }
                let confirmed = self.confirm(
                    guard,
                    "Do you really want to reset all changes to this file?",
                )?;
                if !confirmed {
                    return Ok(Refresh::Populated);
                }
                if let Err(e) = self.repo.checkout_path(&entry.path) {
                    self.state.set_status(e.to_string());
                    return Ok(Refresh::Populated);
                }
                self.refresh()
            }
            UiAction::Reload => self.refresh(),
            UiAction::Diff => {
                let Some(entry) = self.state.selected_entry().cloned() else {
                    return Ok(Refresh::Populated);
                };
                self.run_external(guard, &external::diff_command(&entry))?;
                self.refresh()
            }
            UiAction::InteractiveStage => {
                let Some(entry) = self.state.selected_entry().cloned() else {
                    return Ok(Refresh::Populated);
                };
                self.run_external(guard, &external::interactive_stage_command(&entry.path))?;
                self.refresh()
            }
            UiAction::Commit { amend } => {
                self.run_external(guard, &external::commit_command(amend))?;
                self.refresh()
            }
            UiAction::Push { set_upstream } => {
                let branch = if set_upstream {
                    match self.repo.current_branch() {
                        Ok(branch) => Some(branch),
                        Err(e) => {
                            self.state.set_status(e.to_string());
                            return Ok(Refresh::Populated);
                        }
                    }
                } else {
                    None
                };
                let command = external::push_command(set_upstream, branch.as_deref());
                self.run_external(guard, &command)?;
                self.refresh()
            }
            UiAction::Edit => {
                let Some(entry) = self.state.selected_entry().cloned() else {
                    return Ok(Refresh::Populated);
                };
                self.run_external(guard, &external::edit_command(&entry.path))?;
                self.refresh()
            }
            UiAction::RunCommand(command) => {
                self.run_external(guard, &command)?;
                self.refresh()
            }
        }
    }

    /// Unstage one entry per its category. Returns false when the user
    /// declined a deletion or the backend reported an error.
    fn unstage_entry(&mut self, guard: &mut TerminalGuard, entry: &ItemEntry) -> Result<bool> {
        let result = match entry.category {
            Category::Index => self.repo.unstage_from_index(&entry.path),
            Category::Workspace => self.repo.unstage_from_workspace(&entry.path, entry.kind),
            Category::Untracked => {
                let message = format!("Delete File '{}'?", entry.path);
                if !self.confirm(guard, &message)? {
                    return Ok(false);
                }
                self.repo.delete_untracked(&entry.path)
            }
        };

        if let Err(e) = result {
            self.state.set_status(e.to_string());
            return Ok(false);
        }
        Ok(true)
    }

    /// Perform a bulk action on every marked entry (store-wide), then
    /// restore the selection to the precomputed anchor.
    fn apply_to_marked(&mut self, guard: &mut TerminalGuard, action: BulkAction) -> Result<Refresh> {
        let anchor = self.state.bulk_anchor();

        for entry in self.state.store.marked_items() {
            let outcome = match action {
                BulkAction::Stage => match self.repo.stage(&entry.path) {
                    Ok(()) => true,
                    Err(e) => {
                        self.state.set_status(e.to_string());
                        false
                    }
                },
                BulkAction::Unstage => self.unstage_entry(guard, &entry)?,
            };
            if !outcome {
                break;
            }
        }

        // marks are consumed by the action
        self.state.store.clear_marks();

        let refresh = self.refresh()?;
        if refresh == Refresh::Empty {
            return Ok(Refresh::Empty);
        }

        match anchor {
            Some(id) if self.state.store.position_of(&id).is_some() => {
                self.state.selected = Some(id);
            }
            _ => self.state.select_first(),
        }
        Ok(Refresh::Populated)
    }

    /// Rebuild the store from a fresh snapshot; an empty snapshot ends the
    /// session.
    fn refresh(&mut self) -> Result<Refresh> {
        let snapshot = self.repo.query_status()?;
        if snapshot.is_empty() {
            return Ok(Refresh::Empty);
        }
        self.state.rebuild(&snapshot);
        Ok(Refresh::Populated)
    }

    /// Suspend the UI and hand the terminal to an external command.
    ///
    /// Spawn failures surface as a transient status message; the exit
    /// status of the command itself is ignored.
    fn run_external(&mut self, guard: &mut TerminalGuard, command: &str) -> Result<()> {
        let workdir = self.repo.workdir()?.to_path_buf();
        let result = guard.suspend(|| external::run_interactive(command, &workdir))?;
        if let Err(e) = result {
            self.state.set_status(e.to_string());
        }
        Ok(())
    }

    /// Blocking yes/no dialog in the status bar.
    fn confirm(&mut self, guard: &mut TerminalGuard, message: &str) -> Result<bool> {
        let mut verbose = false;
        let answer = loop {
            if self.interrupt.load(Ordering::Relaxed) {
                break false;
            }

            let prompt = if verbose {
                format!("PLEASE ENTER {message} [Y]es or [N]o")
            } else {
                format!("{message} [Y]es or [N]o")
            };
            self.state.set_status(prompt);
            guard.draw(|frame| render::draw(frame, &self.state))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => break true,
                KeyCode::Char('n') | KeyCode::Char('N') => break false,
                _ => verbose = true,
            }
        };

        self.state.clear_status();
        Ok(answer)
    }
}
