//! Interactive terminal UI: state machine, input routing, layout and
//! rendering.

pub mod app;
pub mod help;
pub mod input;
pub mod layout;
pub mod render;
pub mod state;
pub mod terminal;

// === Event loop ===
pub use app::App;

// === State machine ===
pub use state::{AppState, Mode};

// === Input routing ===
pub use input::{route, Outcome, UiAction};

// === Layout engine ===
pub use layout::{compute, PlanRow, RenderPlan};

// === Terminal plumbing ===
pub use terminal::TerminalGuard;
