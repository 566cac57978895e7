//! Test data generation utilities and predefined scenarios
//!
//! Provides functions for creating repositories with specific file states
//! to exercise the three status sections consistently.

#![allow(dead_code)]

use super::repository::*;
use git_stager::core::error::Result;

/// Scenario: one entry in every section.
///
/// - `staged.txt` is committed, modified and staged (Index)
/// - `changed.txt` is committed and modified in place (Workspace)
/// - `fresh.txt` is brand new (Untracked)
pub fn create_three_section_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "staged.txt", "original\n")?;
    create_file(&repo.path, "changed.txt", "original\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    create_file(&repo.path, "staged.txt", "staged change\n")?;
    git_add(&repo.path, "staged.txt")?;
    create_file(&repo.path, "changed.txt", "workspace change\n")?;
    create_file(&repo.path, "fresh.txt", "new content\n")?;

    Ok(repo)
}

/// Scenario: several workspace modifications for navigation testing
pub fn create_multi_file_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    let names = ["file1.txt", "file2.txt", "file3.txt", "file4.txt"];
    for (i, name) in names.iter().enumerate() {
        create_file(&repo.path, name, &format!("content{}\n", i + 1))?;
    }
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    for (i, name) in names.iter().enumerate() {
        create_file(&repo.path, name, &format!("modified{}\n", i + 1))?;
    }

    Ok(repo)
}
