//! Key binding reference shown in the status bar and the help overlay.

use crate::core::entries::Category;

/// One key binding: the key, a short name for the status bar, and a longer
/// description for the help overlay.
pub struct HelpEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
}

/// Placeholder names resolved per selection category at render time
pub const ACTION_A: &str = "ACTION_A";
pub const ACTION_B: &str = "ACTION_B";

/// The full key binding table, in status-bar priority order
pub const HELP_ENTRIES: &[HelpEntry] = &[
    HelpEntry { key: "j", name: "down", desc: "Go to the next line" },
    HelpEntry { key: "k", name: "up", desc: "Go to the previous line" },
    HelpEntry { key: "s", name: ACTION_A, desc: "Add file or stage changes" },
    HelpEntry { key: "u", name: ACTION_B, desc: "Unstage changes or delete file" },
    HelpEntry { key: "/", name: "filter", desc: "Filter the list of files" },
    HelpEntry { key: "q", name: "quit", desc: "Quit the program" },
    HelpEntry { key: "d", name: "diff", desc: "Run `git diff` on the selected file" },
    HelpEntry { key: "i", name: "add -p", desc: "Run git interactive add on the selected file" },
    HelpEntry { key: "c", name: "commit", desc: "Run `git commit`" },
    HelpEntry { key: "C", name: "amend", desc: "Run `git commit --amend`" },
    HelpEntry { key: "p", name: "push", desc: "Run `git push`" },
    HelpEntry { key: "P", name: "push -u", desc: "Run `git push --set-upstream origin <branch>`" },
    HelpEntry { key: "e", name: "edit", desc: "Open the selected file in $EDITOR" },
    HelpEntry { key: "C-d", name: "jump down", desc: "Jump half a screen down" },
    HelpEntry { key: "C-u", name: "jump up", desc: "Jump half a screen up" },
    HelpEntry { key: "!", name: "go index", desc: "Jump to the index [Shift 1]" },
    HelpEntry { key: "@", name: "go workspace", desc: "Jump to the workspace [Shift 2]" },
    HelpEntry { key: "#", name: "go untracked", desc: "Jump to the untracked [Shift 3]" },
    HelpEntry { key: "G", name: "bottom", desc: "Jump to the bottom of the list" },
    HelpEntry { key: "g", name: "top", desc: "Jump to the top of the list" },
    HelpEntry { key: "m", name: "mark", desc: "Mark / Unmark the selected file" },
    HelpEntry { key: "M", name: "mark section", desc: "Mark / Unmark all files in section" },
    HelpEntry {
        key: "V",
        name: "visual mark mode",
        desc: "Toggle Visual Mark mode to mark files by moving. ESC cancels",
    },
    HelpEntry { key: "S", name: "s action on marked", desc: "Perform the add/stage action on all marked files" },
    HelpEntry { key: "U", name: "u action on marked", desc: "Perform the unstage/delete action on all marked files" },
    HelpEntry { key: "x", name: "reset", desc: "Remove all changes this file has. Like `git checkout -- file`" },
    HelpEntry { key: "r", name: "reload", desc: "Reload the repository status" },
    HelpEntry { key: ":", name: "command", desc: "Run an arbitrary command from the repository root" },
];

/// Extra hint shown below the binding table on the help screen
pub const REPEAT_HINT: &str = "Use 1-9 before j/k/C-d/C-u to repeat the action [like vi]";

/// Names of the `s` and `u` actions for the current selection category.
///
/// What the two action keys do depends on where the selected entry lives,
/// so the status bar labels them dynamically.
pub fn action_names(category: Option<Category>) -> (&'static str, &'static str) {
    match category {
        Some(Category::Index) => ("", "unstage"),
        Some(Category::Workspace) => ("stage", "stage delete"),
        Some(Category::Untracked) => ("stage", "delete file"),
        None => ("", ""),
    }
}
