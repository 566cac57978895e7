//! External interactive program invocation.
//!
//! Diff paging, interactive staging, committing, pushing and editing all run
//! as external programs that take over the terminal. The caller is expected
//! to suspend the UI around [`run_interactive`]; the command runs to
//! completion synchronously and its exit status is deliberately ignored (an
//! aborted commit or a quit pager is not an error).

use crate::core::{
    entries::{Category, ItemEntry},
    error::{GitStagerError, Result},
};
use std::path::Path;
use std::process::{Command, Stdio};

/// Pager used for diffs: raw colors, no wrapping, no clearing on exit,
/// and never auto-quit on short output.
const DIFF_PAGER: &str = "less -RSX -+F";

/// Hand the terminal to `command_line` (via `sh -c`) until it exits.
///
/// Stdio is inherited so the child has full terminal control. The exit
/// status is logged and discarded.
pub fn run_interactive(command_line: &str, workdir: &Path) -> Result<()> {
    log::debug!("running external command: {command_line}");

    let status = Command::new("/bin/sh")
        .arg("-c")
        .arg(command_line)
        .current_dir(workdir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| GitStagerError::external_command(command_line, e))?;

    log::debug!("external command exited with {status}");
    Ok(())
}

/// Quote a string for safe interpolation into a `sh -c` command line
pub fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// Build the diff command for an entry.
///
/// Index entries diff against HEAD with `--cached`; untracked files diff
/// against `/dev/null` so new content is still viewable. The pager is
/// pinned via `GIT_PAGER` so short diffs stay on screen.
pub fn diff_command(entry: &ItemEntry) -> String {
    let param = match entry.category {
        Category::Index => "--cached ",
        Category::Workspace => "",
        Category::Untracked => "--no-index /dev/null ",
    };
    format!(
        "GIT_PAGER={} git diff {}{}",
        shell_quote(DIFF_PAGER),
        param,
        shell_quote(&entry.path)
    )
}

/// Build the `git add -p` command for a path
pub fn interactive_stage_command(path: &str) -> String {
    format!("git add -p {}", shell_quote(path))
}

/// Build the commit command, optionally amending
pub fn commit_command(amend: bool) -> String {
    if amend {
        "git commit --amend".to_string()
    } else {
        "git commit".to_string()
    }
}

/// Build the push command, optionally setting the upstream for `branch`
pub fn push_command(set_upstream: bool, branch: Option<&str>) -> String {
    match (set_upstream, branch) {
        (true, Some(branch)) => {
            format!("git push --set-upstream origin {}", shell_quote(branch))
        }
        _ => "git push".to_string(),
    }
}

/// Build the editor command for a path, honoring `$EDITOR` with a `vi`
/// fallback
pub fn edit_command(path: &str) -> String {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    format!("{} {}", editor, shell_quote(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::change_kind::ChangeKind;

    fn entry(path: &str, category: Category) -> ItemEntry {
        ItemEntry {
            path: path.to_string(),
            kind: ChangeKind::Modified,
            category,
            marked: false,
        }
    }

    #[test]
    fn test_shell_quote_plain() {
        assert_eq!(shell_quote("src/main.rs"), "'src/main.rs'");
    }

    #[test]
    fn test_shell_quote_embedded_quote() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_diff_command_per_category() {
        let index = diff_command(&entry("a.rs", Category::Index));
        assert!(index.contains("git diff --cached 'a.rs'"));

        let workspace = diff_command(&entry("a.rs", Category::Workspace));
        assert!(workspace.contains("git diff 'a.rs'"));
        assert!(!workspace.contains("--cached"));

        let untracked = diff_command(&entry("a.rs", Category::Untracked));
        assert!(untracked.contains("--no-index /dev/null 'a.rs'"));
    }

    #[test]
    fn test_diff_command_pins_pager() {
        let cmd = diff_command(&entry("a.rs", Category::Workspace));
        assert!(cmd.starts_with("GIT_PAGER='less -RSX -+F' "));
    }

    #[test]
    fn test_commit_command() {
        assert_eq!(commit_command(false), "git commit");
        assert_eq!(commit_command(true), "git commit --amend");
    }

    #[test]
    fn test_push_command() {
        assert_eq!(push_command(false, None), "git push");
        assert_eq!(push_command(false, Some("main")), "git push");
        assert_eq!(
            push_command(true, Some("main")),
            "git push --set-upstream origin 'main'"
        );
    }

    #[test]
    fn test_interactive_stage_command() {
        assert_eq!(
            interactive_stage_command("src/lib.rs"),
            "git add -p 'src/lib.rs'"
        );
    }

    #[test]
    fn test_run_interactive_ignores_exit_status() {
        let dir = std::env::temp_dir();
        // `false` exits non-zero; that must not surface as an error
        assert!(run_interactive("false", &dir).is_ok());
    }
}
