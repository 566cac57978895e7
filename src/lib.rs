//! Git Stager - an interactive terminal UI for staging git changes.
//!
//! This library provides the core functionality for git-stager: the entry
//! store and search filter, the navigation/marking state machine, modal
//! input routing, the pagination layout engine, and the git backend the UI
//! drives. It is designed to be fast, type-safe, and entirely testable
//! without a terminal.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] and [`ui`]
//! modules, which provide:
//! - Git repository operations (status snapshots, staging, discarding)
//! - The tagged row model and identity-based selection
//! - The modal input router and repeat-count handling
//! - The pure layout engine for pagination and relative line numbers
//! - Error handling and result types

pub mod core;
pub mod ui;

// Re-export the core public API for external users
pub use crate::core::{
    print_error,
    print_info,
    print_success,

    Category,
    ChangeKind,
    // Row model
    EntryStore,
    // Error handling
    GitStagerError,
    // Git operations
    GitRepo,
    ItemEntry,
    Result,
    Row,
    RowId,
    StatusSnapshot,
};

pub use crate::ui::{App, AppState, Mode, Outcome, UiAction};
