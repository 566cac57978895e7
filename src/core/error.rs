//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitStagerError`] which covers all failure modes of
//! git-stager. It uses `thiserror` for ergonomic error definitions and
//! includes specialized constructors for common failure scenarios.
//!
//! # Public API
//! - [`GitStagerError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitStagerError>`
//!
//! # Error Categories
//! - **Startup**: repository cannot be opened, repository is bare
//! - **Git operations**: git2 library errors, index write failures
//! - **External programs**: shell/editor/pager invocation failures
//! - **Terminal**: raw mode and screen setup/teardown failures

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-stager
#[derive(Error, Debug)]
pub enum GitStagerError {
    // Startup errors (fatal, reported before the interactive loop starts)
    #[error("Could not open repository at '{path}': {source}")]
    RepositoryOpen { path: PathBuf, source: git2::Error },

    #[error("Could not report status on bare repository: {path}")]
    BareRepository { path: PathBuf },

    // Git operation errors
    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Invalid UTF-8 path in repository")]
    InvalidUtf8Path,

    #[error("Failed to {operation} '{path}': {source}")]
    IndexOperation {
        operation: &'static str,
        path: PathBuf,
        source: git2::Error,
    },

    #[error("Repository has no working directory")]
    NoWorkingDirectory,

    // External program errors
    #[error("Failed to run '{command}': {source}")]
    ExternalCommand {
        command: String,
        source: std::io::Error,
    },

    #[error("git command failed: {message}")]
    GitCommandFailed { message: String },

    // Terminal / IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using GitStagerError
pub type Result<T> = std::result::Result<T, GitStagerError>;

impl GitStagerError {
    /// Create a repository-open error with path context
    pub fn repository_open(path: impl Into<PathBuf>, source: git2::Error) -> Self {
        Self::RepositoryOpen {
            path: path.into(),
            source,
        }
    }

    /// Create an index operation error with path context
    pub fn index_operation(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: git2::Error,
    ) -> Self {
        Self::IndexOperation {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Create an external command error
    pub fn external_command(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::ExternalCommand {
            command: command.into(),
            source,
        }
    }

    /// Create a git command failure from captured stderr
    pub fn git_command_failed(message: impl Into<String>) -> Self {
        Self::GitCommandFailed {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_repository_display() {
        let err = GitStagerError::BareRepository {
            path: PathBuf::from("/tmp/bare.git"),
        };
        assert_eq!(
            err.to_string(),
            "Could not report status on bare repository: /tmp/bare.git"
        );
    }

    #[test]
    fn test_repository_open_display() {
        let source = git2::Error::from_str("not a repository");
        let err = GitStagerError::repository_open("/tmp/nowhere", source);
        assert!(err.to_string().contains("/tmp/nowhere"));
        assert!(err.to_string().contains("not a repository"));
    }

    #[test]
    fn test_index_operation_display() {
        let source = git2::Error::from_str("index locked");
        let err = GitStagerError::index_operation("stage", "src/main.rs", source);
        assert!(err.to_string().contains("stage"));
        assert!(err.to_string().contains("src/main.rs"));
        assert!(err.to_string().contains("index locked"));
    }

    #[test]
    fn test_external_command_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = GitStagerError::external_command("git diff", io_err);
        assert!(err.to_string().contains("git diff"));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_git_command_failed_display() {
        let err = GitStagerError::git_command_failed("pathspec did not match");
        assert_eq!(
            err.to_string(),
            "git command failed: pathspec did not match"
        );
    }
}
