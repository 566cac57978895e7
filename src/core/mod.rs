//! Core functionality for the git-stager tool.
//!
//! This module provides the fundamental building blocks: the row model and
//! entry store, git repository operations, external program invocation, and
//! error handling.

pub mod change_kind;
pub mod entries;
pub mod error;
pub mod external;
pub mod git;
pub mod output;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{GitStagerError, Result};

// === Git operations ===
// Main git repository interface for status, staging and discarding
pub use git::GitRepo;

// === Change classification ===
// Type-safe change kinds replacing raw git2 status bitflags
pub use change_kind::ChangeKind;

// === Row model ===
// Entry store, tagged rows and identity-based selection keys
pub use entries::{Category, EntryStore, ItemEntry, Row, RowId, StatusSnapshot};

// === External programs ===
// Interactive command invocation and command-line builders
pub use external::run_interactive;

// === Output formatting ===
// Plain-terminal messages for startup errors and exit notes
pub use output::{print_error, print_info, print_success};
