//! Git repository operations for the staging UI.
//!
//! This module provides a high-level interface to git operations through the
//! [`GitRepo`] struct. It wraps the `git2` library for status queries and
//! index manipulation, and falls back to the git command line where libgit2
//! is unreliable (single-path checkout).
//!
//! # Public API
//! - [`GitRepo`]: Main interface for git repository operations
//!
//! # Key Features
//! - **Status snapshots**: three ordered groups (index, workspace, untracked)
//! - **Staging**: files, directories and staged deletions
//! - **Unstaging**: reset-to-HEAD for index entries, index removal for
//!   workspace entries
//! - **Discarding**: checkout of a single path via the git CLI
//! - **Untracked cleanup**: filesystem removal of files and directories

use crate::core::{
    change_kind::ChangeKind,
    entries::StatusSnapshot,
    error::{GitStagerError, Result},
};
use git2::{Repository, StatusOptions};
use std::path::Path;

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the repository containing `path`.
    ///
    /// Bare repositories are rejected: there is no working tree to stage
    /// from, so the caller reports this as a fatal startup error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path.as_ref())
            .map_err(|e| GitStagerError::repository_open(path.as_ref(), e))?;

        if repo.is_bare() {
            return Err(GitStagerError::BareRepository {
                path: path.as_ref().to_path_buf(),
            });
        }

        Ok(GitRepo { repo })
    }

    /// The repository working directory
    pub fn workdir(&self) -> Result<&Path> {
        self.repo.workdir().ok_or(GitStagerError::NoWorkingDirectory)
    }

    /// Execute a git command in the repository's working directory
    fn execute_git_command(&self, mut cmd: std::process::Command) -> Result<()> {
        let workdir = self.workdir()?;
        cmd.current_dir(workdir);

        let output = cmd.output().map_err(GitStagerError::Io)?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(GitStagerError::git_command_failed(error_msg.trim()));
        }

        Ok(())
    }

    /// Query the repository status as three ordered groups.
    ///
    /// The index group lists HEAD-to-index changes, the workspace group
    /// index-to-workdir changes of tracked files, and the untracked group
    /// workdir-new paths. Renames are detected head-to-index and surface the
    /// pre-rename path; sorting is case-sensitive.
    pub fn query_status(&self) -> Result<StatusSnapshot> {
        let mut opts = StatusOptions::new();
        opts.show(git2::StatusShow::IndexAndWorkdir)
            .include_untracked(true)
            .renames_head_to_index(true)
            .sort_case_sensitively(true);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut snapshot = StatusSnapshot::default();

        for entry in statuses.iter() {
            let flags = entry.status();
            if flags == git2::Status::CURRENT {
                continue;
            }

            if let Some(kind) = ChangeKind::from_index_flags(flags) {
                let path = delta_path(entry.head_to_index())
                    .or_else(|| entry.path().map(str::to_string))
                    .ok_or(GitStagerError::InvalidUtf8Path)?;
                snapshot.index.push((path, kind));
            }

            if entry.index_to_workdir().is_some() {
                if let Some(kind) = ChangeKind::from_workdir_flags(flags) {
                    let path = delta_path(entry.index_to_workdir())
                        .or_else(|| entry.path().map(str::to_string))
                        .ok_or(GitStagerError::InvalidUtf8Path)?;
                    snapshot.workspace.push((path, kind));
                }

                if flags.contains(git2::Status::WT_NEW) {
                    let path = delta_path(entry.index_to_workdir())
                        .or_else(|| entry.path().map(str::to_string))
                        .ok_or(GitStagerError::InvalidUtf8Path)?;
                    snapshot.untracked.push(path);
                }
            }
        }

        log::debug!(
            "status snapshot: {} index, {} workspace, {} untracked",
            snapshot.index.len(),
            snapshot.workspace.len(),
            snapshot.untracked.len()
        );

        Ok(snapshot)
    }

    /// Stage a path: add files by path, directories recursively, and record
    /// deletions for paths that no longer exist on disk.
    pub fn stage(&self, path: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let full_path = self.workdir()?.join(path);

        if !full_path.exists() {
            // staging a workspace deletion
            index
                .remove_path(Path::new(path))
                .map_err(|e| GitStagerError::index_operation("stage deletion of", path, e))?;
        } else if full_path.is_dir() {
            index
                .add_all([path], git2::IndexAddOption::DEFAULT, None)
                .map_err(|e| GitStagerError::index_operation("stage directory", path, e))?;
        } else {
            index
                .add_path(Path::new(path))
                .map_err(|e| GitStagerError::index_operation("stage", path, e))?;
        }

        index
            .write()
            .map_err(|e| GitStagerError::index_operation("write index for", path, e))
    }

    /// Unstage an index entry by resetting the path to HEAD.
    ///
    /// On an unborn branch there is no HEAD commit; resetting against no
    /// target removes the entry from the index instead.
    pub fn unstage_from_index(&self, path: &str) -> Result<()> {
        let head_commit = match self.repo.head() {
            Ok(head) => Some(head.peel(git2::ObjectType::Commit)?),
            Err(_) => None,
        };

        self.repo
            .reset_default(head_commit.as_ref(), [path])
            .map_err(|e| GitStagerError::index_operation("unstage", path, e))
    }

    /// Unstage a workspace entry by removing it from the index.
    ///
    /// A workspace deletion has nothing left to remove; it is discarded via
    /// checkout instead, restoring the file from the index.
    pub fn unstage_from_workspace(&self, path: &str, kind: ChangeKind) -> Result<()> {
        if kind == ChangeKind::Deleted {
            return self.checkout_path(path);
        }

        let mut index = self.repo.index()?;
        index
            .remove_path(Path::new(path))
            .map_err(|e| GitStagerError::index_operation("remove from index", path, e))?;
        index
            .write()
            .map_err(|e| GitStagerError::index_operation("write index for", path, e))
    }

    /// Delete an untracked path from the filesystem.
    ///
    /// Only ever called after an interactive confirmation.
    pub fn delete_untracked(&self, path: &str) -> Result<()> {
        let full_path = self.workdir()?.join(path);
        let metadata = std::fs::symlink_metadata(&full_path)?;

        if metadata.is_dir() {
            std::fs::remove_dir_all(&full_path)?;
        } else {
            std::fs::remove_file(&full_path)?;
        }

        log::debug!("deleted untracked path {}", full_path.display());
        Ok(())
    }

    /// Discard all working changes to a path (`git checkout -- <path>`).
    ///
    /// Checking out a single path through libgit2's checkout-head options is
    /// unreliable, so this goes through the git command line.
    pub fn checkout_path(&self, path: &str) -> Result<()> {
        let mut cmd = std::process::Command::new("git");
        cmd.arg("checkout").arg("--").arg(path);
        self.execute_git_command(cmd)
    }

    /// Name of the currently checked-out branch
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        if let Some(branch_name) = head.shorthand() {
            if head.is_branch() {
                return Ok(branch_name.to_string());
            }
        }

        Err(GitStagerError::git_command_failed(
            "HEAD is not on a branch".to_string(),
        ))
    }
}

/// Preferred path of a status delta: the pre-rename path when old and new
/// differ, otherwise whichever side is present.
fn delta_path(delta: Option<git2::DiffDelta<'_>>) -> Option<String> {
    let delta = delta?;
    let old_file = delta.old_file();
    let new_file = delta.new_file();
    let old_path = old_file.path().and_then(Path::to_str);
    let new_path = new_file.path().and_then(Path::to_str);

    match (old_path, new_path) {
        (Some(old), Some(new)) if old != new => Some(old.to_string()),
        (Some(old), _) => Some(old.to_string()),
        (_, Some(new)) => Some(new.to_string()),
        (None, None) => None,
    }
}
