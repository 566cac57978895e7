//! Type-safe change classification for status entries.
//!
//! This module defines [`ChangeKind`] which classifies every path that shows
//! up in a status snapshot. It provides direct conversion from `git2::Status`
//! flags for both the HEAD-to-index and index-to-workdir sides, so the rest
//! of the codebase never has to match on raw bitflags.
//!
//! # Public API
//! - [`ChangeKind`]: Enumeration of all change types shown in the list

use std::fmt;

/// Classification of a single changed path.
///
/// This replaces raw `git2::Status` bitflag checks throughout the codebase
/// with a proper enumeration, so skip-logic and display formatting are
/// exhaustive and compiler-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// New file added to the index
    New,
    /// Content changed
    Modified,
    /// File removed
    Deleted,
    /// File moved/renamed
    Renamed,
    /// File mode or type changed
    TypeChanged,
    /// File not known to the index
    Untracked,
}

impl ChangeKind {
    /// Classify the HEAD-to-index side of a status entry.
    ///
    /// Returns `None` for entries without staged changes.
    pub fn from_index_flags(flags: git2::Status) -> Option<ChangeKind> {
        if flags.contains(git2::Status::INDEX_NEW) {
            return Some(ChangeKind::New);
        }
        if flags.contains(git2::Status::INDEX_MODIFIED) {
            return Some(ChangeKind::Modified);
        }
        if flags.contains(git2::Status::INDEX_DELETED) {
            return Some(ChangeKind::Deleted);
        }
        if flags.contains(git2::Status::INDEX_RENAMED) {
            return Some(ChangeKind::Renamed);
        }
        if flags.contains(git2::Status::INDEX_TYPECHANGE) {
            return Some(ChangeKind::TypeChanged);
        }
        None
    }

    /// Classify the index-to-workdir side of a status entry.
    ///
    /// Untracked files (`WT_NEW`) are collected separately by the status
    /// query, so they are not reported here.
    pub fn from_workdir_flags(flags: git2::Status) -> Option<ChangeKind> {
        if flags.contains(git2::Status::WT_MODIFIED) {
            return Some(ChangeKind::Modified);
        }
        if flags.contains(git2::Status::WT_DELETED) {
            return Some(ChangeKind::Deleted);
        }
        if flags.contains(git2::Status::WT_RENAMED) {
            return Some(ChangeKind::Renamed);
        }
        if flags.contains(git2::Status::WT_TYPECHANGE) {
            return Some(ChangeKind::TypeChanged);
        }
        None
    }

    /// Human-readable description shown in the entry list
    pub fn description(&self) -> &'static str {
        match self {
            ChangeKind::New => "new file",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Renamed => "renamed",
            ChangeKind::TypeChanged => "typechange",
            ChangeKind::Untracked => "untracked",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
