//! Modal input routing.
//!
//! Raw key events are dispatched according to the active [`Mode`]: Normal
//! mode runs navigation and action commands through a fixed keymap, Search
//! and Command modes edit their text buffers, and the help overlay returns
//! to Normal on any key. Digits typed in Normal mode accumulate a repeat
//! prefix for the next directional command; any other key consumes and
//! clears it. Unrecognized keys are inert.

use crate::ui::state::{AppState, Mode};
use crate::core::entries::Category;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// An action the event loop must run against the backend or the terminal.
///
/// Navigation and marking mutate [`AppState`] directly inside the router;
/// everything that touches the repository or suspends the screen is handed
/// back to the event loop as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Stage,
    Unstage,
    BulkStage,
    BulkUnstage,
    Checkout,
    Reload,
    Diff,
    InteractiveStage,
    Commit { amend: bool },
    Push { set_upstream: bool },
    Edit,
    RunCommand(String),
}

/// Result of routing one key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
    Action(UiAction),
}

/// Route one key event through the modal state machine.
pub fn route(state: &mut AppState, key: &KeyEvent) -> Outcome {
    if key.kind != KeyEventKind::Press {
        return Outcome::Continue;
    }

    // a transient mutation message lives until the next keypress
    state.clear_status();

    match state.mode {
        Mode::Search => route_search(state, key),
        Mode::Command => route_command(state, key),
        Mode::Help => {
            state.mode = Mode::Normal;
            Outcome::Continue
        }
        Mode::Normal => route_normal(state, key),
    }
}

fn route_search(state: &mut AppState, key: &KeyEvent) -> Outcome {
    match key.code {
        KeyCode::Enter => {
            state.mode = Mode::Normal;
            // the selection may have been filtered away while typing
            if state.view_position_of_selection().is_none() {
                state.select_first();
            }
        }
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            state.clear_search();
        }
        KeyCode::Backspace => state.pop_search_char(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.push_search_char(ch);
        }
        _ => {}
    }
    Outcome::Continue
}

fn route_command(state: &mut AppState, key: &KeyEvent) -> Outcome {
    match key.code {
        KeyCode::Enter => {
            state.mode = Mode::Normal;
            let buffer = std::mem::take(&mut state.command_buffer);
            if !buffer.trim().is_empty() {
                return Outcome::Action(UiAction::RunCommand(buffer));
            }
        }
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            state.command_buffer.clear();
        }
        KeyCode::Backspace => {
            state.command_buffer.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.command_buffer.push(ch);
        }
        _ => {}
    }
    Outcome::Continue
}

fn route_normal(state: &mut AppState, key: &KeyEvent) -> Outcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // digits accumulate the repeat prefix and survive until the next command
    if let KeyCode::Char(ch) = key.code {
        if !ctrl && ch.is_ascii_digit() {
            state.push_repeat_digit(ch);
            return Outcome::Continue;
        }
    }

    let count = state.repeat_count();
    let outcome = match (key.code, ctrl) {
        // interrupt: treated like quit so the loop can restore the terminal
        (KeyCode::Char('c'), true) => Outcome::Quit,

        // navigation
        (KeyCode::Char('j'), false) | (KeyCode::Down, _) => {
            state.move_selection(1, count);
            Outcome::Continue
        }
        (KeyCode::Char('k'), false) | (KeyCode::Up, _) => {
            state.move_selection(-1, count);
            Outcome::Continue
        }
        (KeyCode::Char('d'), true) => {
            state.move_selection(10, count);
            Outcome::Continue
        }
        (KeyCode::Char('u'), true) => {
            state.move_selection(-10, count);
            Outcome::Continue
        }
        (KeyCode::Char('g'), false) => {
            state.select_first();
            Outcome::Continue
        }
        (KeyCode::Char('G'), false) => {
            state.select_last();
            Outcome::Continue
        }
        (KeyCode::Char('!'), false) => {
            state.select_category(Category::Index);
            Outcome::Continue
        }
        (KeyCode::Char('@'), false) => {
            state.select_category(Category::Workspace);
            Outcome::Continue
        }
        (KeyCode::Char('#'), false) => {
            state.select_category(Category::Untracked);
            Outcome::Continue
        }

        // marking
        (KeyCode::Char('m'), false) => {
            state.toggle_mark_at_selection();
            Outcome::Continue
        }
        (KeyCode::Char('M'), false) => {
            state.toggle_section_marks();
            Outcome::Continue
        }
        (KeyCode::Char('V'), false) => {
            state.toggle_visual_mode();
            Outcome::Continue
        }

        // mode switches
        (KeyCode::Char('/'), false) => {
            state.mode = Mode::Search;
            Outcome::Continue
        }
        (KeyCode::Char(':'), false) => {
            state.mode = Mode::Command;
            Outcome::Continue
        }
        (KeyCode::Char('h'), false) => {
            state.mode = Mode::Help;
            Outcome::Continue
        }
        (KeyCode::Esc, _) => {
            // priority: drop the filter first, then cancel visual marking
            if !state.search_term.is_empty() {
                state.clear_search();
            } else if state.visual_mode {
                state.cancel_visual_mode();
            }
            Outcome::Continue
        }
        (KeyCode::Char('q'), false) => Outcome::Quit,

        // backend actions, handled by the event loop
        (KeyCode::Char('s'), false) => Outcome::Action(UiAction::Stage),
        (KeyCode::Char('u'), false) => Outcome::Action(UiAction::Unstage),
        (KeyCode::Char('S'), false) => Outcome::Action(UiAction::BulkStage),
        (KeyCode::Char('U'), false) => Outcome::Action(UiAction::BulkUnstage),
        (KeyCode::Char('x'), false) => Outcome::Action(UiAction::Checkout),
        (KeyCode::Char('r'), false) => Outcome::Action(UiAction::Reload),
        (KeyCode::Char('d'), false) => Outcome::Action(UiAction::Diff),
        (KeyCode::Char('i'), false) => Outcome::Action(UiAction::InteractiveStage),
        (KeyCode::Char('c'), false) => Outcome::Action(UiAction::Commit { amend: false }),
        (KeyCode::Char('C'), false) => Outcome::Action(UiAction::Commit { amend: true }),
        (KeyCode::Char('p'), false) => Outcome::Action(UiAction::Push { set_upstream: false }),
        (KeyCode::Char('P'), false) => Outcome::Action(UiAction::Push { set_upstream: true }),
        (KeyCode::Char('e'), false) => Outcome::Action(UiAction::Edit),

        _ => Outcome::Continue,
    };

    // any non-digit command consumes the prefix
    state.clear_repeat();
    outcome
}
