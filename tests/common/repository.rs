//! Git repository management and setup utilities
//!
//! Provides functions for creating and managing test repositories with
//! various states and configurations for comprehensive testing scenarios.

#![allow(dead_code)]

use git_stager::core::error::{GitStagerError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Sets up a fresh git repository for testing
///
/// Creates a temporary directory, initializes it as a git repository,
/// and sets up basic git configuration to avoid user prompts.
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(GitStagerError::Io)?;
    let repo_path = temp_dir.path().to_path_buf();

    std::process::Command::new("git")
        .args(["init"])
        .current_dir(&repo_path)
        .output()
        .map_err(GitStagerError::Io)?;

    // Set git config to avoid prompts during tests
    std::process::Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(&repo_path)
        .output()
        .map_err(GitStagerError::Io)?;

    std::process::Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(&repo_path)
        .output()
        .map_err(GitStagerError::Io)?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with an initial commit
///
/// Creates a repository using `setup_test_repo()` and adds an initial
/// commit with a basic file to establish a git history.
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Creates a file with specified content in the repository
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    if let Some(parent) = repo_path.join(filename).parent() {
        fs::create_dir_all(parent).map_err(GitStagerError::Io)?;
    }
    fs::write(repo_path.join(filename), content).map_err(GitStagerError::Io)?;
    Ok(())
}

/// Adds a file to the git index
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    std::process::Command::new("git")
        .args(["add", filename])
        .current_dir(repo_path)
        .output()
        .map_err(GitStagerError::Io)?;
    Ok(())
}

/// Creates a git commit with the specified message
pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    std::process::Command::new("git")
        .args(["commit", "-m", message])
        .current_dir(repo_path)
        .output()
        .map_err(GitStagerError::Io)?;
    Ok(())
}

/// Removes a file from the filesystem (not from git)
pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename)).map_err(GitStagerError::Io)?;
    Ok(())
}

/// Creates a GitRepo from a TestRepo for use with git2-based operations
pub fn create_git_repo(test_repo: &TestRepo) -> Result<git_stager::core::git::GitRepo> {
    git_stager::core::git::GitRepo::open(&test_repo.path)
}
