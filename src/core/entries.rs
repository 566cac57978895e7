//! Row model, entry store and search filtering.
//!
//! The entry list mixes two kinds of rows: synthetic category headers and
//! real change entries. They are modeled as a tagged [`Row`] enum so that
//! header-skipping logic is exhaustive instead of a runtime flag checked at
//! every call site.
//!
//! # Public API
//! - [`Category`]: the three status sections, in fixed display order
//! - [`Row`] / [`ItemEntry`]: the tagged row model
//! - [`RowId`]: stable `(path, category)` identity of an item row
//! - [`StatusSnapshot`]: raw backend status, input to a rebuild
//! - [`EntryStore`]: the full ordered row list plus mark state
//!
//! # Lifecycle
//! The store is rebuilt wholesale from a [`StatusSnapshot`] on startup and
//! after every mutating action; it is never patched incrementally. Filtered
//! views hold indices into the store and must be recomputed after a rebuild.

use crate::core::change_kind::ChangeKind;

/// Status sections, in the fixed order they appear in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Index,
    Workspace,
    Untracked,
}

impl Category {
    /// Display order of the sections
    pub const ORDER: [Category; 3] = [Category::Index, Category::Workspace, Category::Untracked];

    /// Section title shown on the header row
    pub fn title(&self) -> &'static str {
        match self {
            Category::Index => "Index",
            Category::Workspace => "Workspace",
            Category::Untracked => "Untracked",
        }
    }
}

/// Stable identity of an item row: the same `(path, category)` pair refers
/// to the same logical entry across full store rebuilds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowId {
    pub path: String,
    pub category: Category,
}

impl RowId {
    pub fn new(path: impl Into<String>, category: Category) -> Self {
        Self {
            path: path.into(),
            category,
        }
    }
}

/// A single change entry in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    pub path: String,
    pub kind: ChangeKind,
    pub category: Category,
    pub marked: bool,
}

impl ItemEntry {
    pub fn id(&self) -> RowId {
        RowId::new(self.path.clone(), self.category)
    }
}

/// A row of the entry list: either a section header or a change entry.
///
/// Headers never carry mark state and are never selectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Header(Category),
    Item(ItemEntry),
}

impl Row {
    pub fn is_header(&self) -> bool {
        matches!(self, Row::Header(_))
    }

    /// The item payload, or `None` for headers
    pub fn item(&self) -> Option<&ItemEntry> {
        match self {
            Row::Item(entry) => Some(entry),
            Row::Header(_) => None,
        }
    }

    /// Identity of an item row, or `None` for headers
    pub fn id(&self) -> Option<RowId> {
        self.item().map(ItemEntry::id)
    }

    /// Category of the row (headers label their own section)
    pub fn category(&self) -> Category {
        match self {
            Row::Header(category) => *category,
            Row::Item(entry) => entry.category,
        }
    }
}

/// Raw backend status, grouped into the three sections.
///
/// Produced by the git backend; consumed by [`EntryStore::rebuild`].
#[derive(Debug, Clone, Default)]
pub struct StatusSnapshot {
    pub index: Vec<(String, ChangeKind)>,
    pub workspace: Vec<(String, ChangeKind)>,
    pub untracked: Vec<String>,
}

impl StatusSnapshot {
    pub fn is_empty(&self) -> bool {
        self.index.is_empty() && self.workspace.is_empty() && self.untracked.is_empty()
    }
}

/// The full ordered row list, rebuilt wholesale from a status snapshot.
#[derive(Debug, Default)]
pub struct EntryStore {
    rows: Vec<Row>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Replace all rows from a backend status snapshot.
    ///
    /// Inserts one header row per non-empty group, groups in fixed order.
    /// Any previously held view indices or selection identities are invalid
    /// after this call and must be re-resolved.
    pub fn rebuild(&mut self, snapshot: &StatusSnapshot) {
        self.rows.clear();

        let mut push_group = |category: Category, entries: &[(String, ChangeKind)]| {
            if entries.is_empty() {
                return;
            }
            self.rows.push(Row::Header(category));
            for (path, kind) in entries {
                self.rows.push(Row::Item(ItemEntry {
                    path: path.clone(),
                    kind: *kind,
                    category,
                    marked: false,
                }));
            }
        };

        push_group(Category::Index, &snapshot.index);
        push_group(Category::Workspace, &snapshot.workspace);

        let untracked: Vec<(String, ChangeKind)> = snapshot
            .untracked
            .iter()
            .map(|path| (path.clone(), ChangeKind::Untracked))
            .collect();
        push_group(Category::Untracked, &untracked);

        log::debug!("entry store rebuilt with {} rows", self.rows.len());
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Derive the filtered view for a search term.
    ///
    /// A row passes if the term is empty, if it is a header, or if its path
    /// contains the term as a case-sensitive substring. Headers always pass,
    /// even when every item of their group is filtered out; the resulting
    /// empty-looking section is defined behavior.
    pub fn filtered_indices(&self, term: &str) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| match row {
                Row::Header(_) => true,
                Row::Item(entry) => term.is_empty() || entry.path.contains(term),
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Store index of the item with the given identity
    pub fn position_of(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id().as_ref() == Some(id))
    }

    /// Set the mark flag on a single item row; no-op on headers
    pub fn set_mark(&mut self, index: usize, marked: bool) {
        if let Some(Row::Item(entry)) = self.rows.get_mut(index) {
            entry.marked = marked;
        }
    }

    /// Flip the mark flag on a single item row; no-op on headers
    pub fn toggle_mark(&mut self, index: usize) {
        if let Some(Row::Item(entry)) = self.rows.get_mut(index) {
            entry.marked = !entry.marked;
        }
    }

    /// Set every item of a category to the given mark state (uniform set)
    pub fn set_section_marks(&mut self, category: Category, marked: bool) {
        for row in &mut self.rows {
            if let Row::Item(entry) = row {
                if entry.category == category {
                    entry.marked = marked;
                }
            }
        }
    }

    /// Clear every mark in the store
    pub fn clear_marks(&mut self) {
        for row in &mut self.rows {
            if let Row::Item(entry) = row {
                entry.marked = false;
            }
        }
    }

    /// All marked items in store order (store-wide, not view-filtered)
    pub fn marked_items(&self) -> Vec<ItemEntry> {
        self.rows
            .iter()
            .filter_map(Row::item)
            .filter(|entry| entry.marked)
            .cloned()
            .collect()
    }

    pub fn mark_count(&self) -> usize {
        self.rows
            .iter()
            .filter_map(Row::item)
            .filter(|entry| entry.marked)
            .count()
    }
}
