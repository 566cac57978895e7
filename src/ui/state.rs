//! Application state: selection, filtering, marking and modal flags.
//!
//! [`AppState`] is the single owned state value threaded through the input
//! router, the layout engine and the event loop; there are no process-wide
//! singletons. Selection is identity-based — a `(path, category)` pair —
//! so it survives the full store rebuild that follows every mutation.

use crate::core::entries::{Category, EntryStore, ItemEntry, Row, RowId, StatusSnapshot};

/// Maximum accumulated search term length
const MAX_SEARCH_CHARS: usize = 256;
/// Maximum digits in the repeat-count prefix; further digits are dropped
const MAX_REPEAT_DIGITS: usize = 7;

/// Input handling modes; exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Command,
    Help,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Full ordered row list, rebuilt after every mutation
    pub store: EntryStore,
    /// Current search term; persists until explicitly cleared
    pub search_term: String,
    /// Store indices of rows passing the current filter
    pub filtered: Vec<usize>,
    /// Identity of the selected item row; may be stale until re-resolved
    pub selected: Option<RowId>,
    /// Active input mode
    pub mode: Mode,
    /// Visual mark mode flag (whole-UI, not per-row)
    pub visual_mode: bool,
    /// Command-mode text buffer
    pub command_buffer: String,
    /// Transient status-bar message (mutation errors), cleared on input
    pub status_message: Option<String>,
    repeat_prefix: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: EntryStore::new(),
            search_term: String::new(),
            filtered: Vec::new(),
            selected: None,
            mode: Mode::Normal,
            visual_mode: false,
            command_buffer: String::new(),
            status_message: None,
            repeat_prefix: String::new(),
        }
    }

    // --- store / filter lifecycle ---

    /// Replace the store from a fresh snapshot and re-resolve the selection.
    ///
    /// Identity resolution is preferred; when the identity vanished (e.g. a
    /// fully staged file left its old category) the selection falls back to
    /// the first item at or after the prior ordinal position.
    pub fn rebuild(&mut self, snapshot: &StatusSnapshot) {
        let old_id = self.selected.clone();
        let old_ordinal = self.selection_ordinal();

        self.store.rebuild(snapshot);
        self.refresh_filter();
        self.restore_selection(old_id, old_ordinal);
    }

    /// Recompute the filtered view from the current search term
    pub fn refresh_filter(&mut self) {
        self.filtered = self.store.filtered_indices(&self.search_term);
    }

    /// Row at a filtered-view position
    pub fn row_at_view(&self, view_index: usize) -> Option<&Row> {
        self.filtered
            .get(view_index)
            .and_then(|&store_index| self.store.get(store_index))
    }

    // --- selection / navigation ---

    /// The selected entry, if the selection identity is present in the store
    pub fn selected_entry(&self) -> Option<&ItemEntry> {
        let id = self.selected.as_ref()?;
        let store_index = self.store.position_of(id)?;
        self.store.get(store_index).and_then(Row::item)
    }

    /// Filtered-view position of the selection, or `None` when stale
    pub fn view_position_of_selection(&self) -> Option<usize> {
        let id = self.selected.as_ref()?;
        self.filtered
            .iter()
            .position(|&store_index| self.store.get(store_index).and_then(Row::id).as_ref() == Some(id))
    }

    /// Filtered-view position of the selection, 0 when stale
    pub fn selection_ordinal(&self) -> usize {
        self.view_position_of_selection().unwrap_or(0)
    }

    /// Select the first item row in the filtered view; no-op without items
    pub fn select_first(&mut self) {
        for &store_index in &self.filtered {
            if let Some(id) = self.store.get(store_index).and_then(Row::id) {
                self.selected = Some(id);
                return;
            }
        }
    }

    /// Select the last item row of the filtered view.
    ///
    /// A trailing header (a section whose items were all filtered out) falls
    /// back to the nearest preceding item.
    pub fn select_last(&mut self) {
        for &store_index in self.filtered.iter().rev() {
            if let Some(id) = self.store.get(store_index).and_then(Row::id) {
                self.selected = Some(id);
                return;
            }
        }
    }

    /// Select the first item of a category; no-op if none is visible
    pub fn select_category(&mut self, category: Category) {
        for &store_index in &self.filtered {
            if let Some(entry) = self.store.get(store_index).and_then(Row::item) {
                if entry.category == category {
                    self.selected = Some(entry.id());
                    return;
                }
            }
        }
    }

    /// Select the row at a filtered-view position, skipping forward past
    /// headers; out-of-bounds positions clamp to the end of the view.
    pub fn select_by_index(&mut self, view_index: usize) {
        if self.filtered.is_empty() {
            self.selected = None;
            return;
        }
        if view_index >= self.filtered.len() {
            self.select_last();
            return;
        }
        // bounded forward scan instead of recursion
        for position in view_index..self.filtered.len() {
            if let Some(id) = self.row_at_view(position).and_then(Row::id) {
                self.selected = Some(id);
                return;
            }
        }
        // ran off the end through trailing headers
        self.select_last();
    }

    /// Move the selection `count` single steps of `step` rows each.
    ///
    /// `step` is ±1 for line moves and ±10 for page moves. Each step skips
    /// headers by sliding one row at a time in the same direction; overflow
    /// wraps to the first item, underflow to the last. A stale selection
    /// resolves to the first item instead of moving.
    pub fn move_selection(&mut self, step: i32, count: usize) {
        if self.filtered.is_empty() {
            return;
        }
        if self.view_position_of_selection().is_none() {
            // the selection left the view (search narrowed it away)
            self.select_first();
            return;
        }
        for _ in 0..count.max(1) {
            self.step_once(step);
        }
    }

    fn step_once(&mut self, step: i32) {
        let Some(current) = self.view_position_of_selection() else {
            self.select_first();
            self.mark_landing();
            return;
        };

        let len = self.filtered.len() as i32;
        let direction = if step < 0 { -1 } else { 1 };
        let mut position = current as i32 + step;

        loop {
            if position < 0 {
                self.select_last();
                break;
            }
            if position >= len {
                self.select_first();
                break;
            }
            match self.row_at_view(position as usize).and_then(Row::id) {
                Some(id) => {
                    self.selected = Some(id);
                    break;
                }
                None => position += direction,
            }
        }
        self.mark_landing();
    }

    /// In visual mode every row landed on by a move is marked
    fn mark_landing(&mut self) {
        if !self.visual_mode {
            return;
        }
        if let Some(id) = self.selected.as_ref() {
            if let Some(store_index) = self.store.position_of(id) {
                self.store.set_mark(store_index, true);
            }
        }
    }

    // --- marking ---

    /// Flip the mark on the selected row; no-op without a resolved selection
    pub fn toggle_mark_at_selection(&mut self) {
        if let Some(id) = self.selected.as_ref() {
            if let Some(store_index) = self.store.position_of(id) {
                self.store.toggle_mark(store_index);
            }
        }
    }

    /// Set every item in the selection's category to the opposite of the
    /// selected row's mark state (uniform set, not per-row toggle)
    pub fn toggle_section_marks(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let category = entry.category;
        let flag = !entry.marked;
        self.store.set_section_marks(category, flag);
    }

    /// Toggle visual mark mode.
    ///
    /// Entering toggles the current selection's mark first, so the anchor
    /// row is part of the range. Leaving via the same key keeps accumulated
    /// marks; only a cancel clears them.
    pub fn toggle_visual_mode(&mut self) {
        if self.visual_mode {
            self.visual_mode = false;
        } else {
            self.toggle_mark_at_selection();
            self.visual_mode = true;
        }
    }

    /// Cancel visual mode: clear the flag and unmark every row
    pub fn cancel_visual_mode(&mut self) {
        self.visual_mode = false;
        self.store.clear_marks();
    }

    /// Cursor-recovery anchor for a bulk action: the first unmarked item at
    /// or after the current ordinal position in the filtered view
    pub fn bulk_anchor(&self) -> Option<RowId> {
        let start = self.selection_ordinal();
        for position in start..self.filtered.len() {
            if let Some(entry) = self.row_at_view(position).and_then(Row::item) {
                if !entry.marked {
                    return Some(entry.id());
                }
            }
        }
        None
    }

    /// Re-resolve the selection after a rebuild: identity first, then the
    /// first item at or after the old ordinal, then the first item overall.
    pub fn restore_selection(&mut self, old_id: Option<RowId>, old_ordinal: usize) {
        if let Some(id) = old_id {
            if self
                .filtered
                .iter()
                .any(|&store_index| self.store.get(store_index).and_then(Row::id).as_ref() == Some(&id))
            {
                self.selected = Some(id);
                return;
            }
        }
        self.select_by_index(old_ordinal);
    }

    // --- repeat-count prefix ---

    /// Append a digit to the repeat prefix; digits past the cap are dropped
    pub fn push_repeat_digit(&mut self, digit: char) {
        debug_assert!(digit.is_ascii_digit());
        if self.repeat_prefix.len() < MAX_REPEAT_DIGITS {
            self.repeat_prefix.push(digit);
        }
    }

    /// The multiplier for the next directional command, minimum 1
    pub fn repeat_count(&self) -> usize {
        self.repeat_prefix.parse::<usize>().ok().filter(|&n| n > 0).unwrap_or(1)
    }

    pub fn clear_repeat(&mut self) {
        self.repeat_prefix.clear();
    }

    pub fn repeat_prefix(&self) -> &str {
        &self.repeat_prefix
    }

    // --- search editing ---

    /// Append a character to the search term and re-filter
    pub fn push_search_char(&mut self, ch: char) {
        if self.search_term.len() >= MAX_SEARCH_CHARS {
            return;
        }
        self.search_term.push(ch);
        self.refresh_filter();
    }

    /// Remove the last search character and re-filter
    pub fn pop_search_char(&mut self) {
        self.search_term.pop();
        self.refresh_filter();
    }

    /// Clear the search term and re-filter
    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.refresh_filter();
    }

    // --- transient status messages ---

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::change_kind::ChangeKind;

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot {
            index: vec![
                ("alpha.rs".to_string(), ChangeKind::Modified),
                ("beta.rs".to_string(), ChangeKind::New),
            ],
            workspace: vec![
                ("gamma.rs".to_string(), ChangeKind::Modified),
                ("delta.txt".to_string(), ChangeKind::Deleted),
            ],
            untracked: vec!["notes.txt".to_string()],
        }
    }

    fn state() -> AppState {
        let mut state = AppState::new();
        state.rebuild(&snapshot());
        state
    }

    fn selected_path(state: &AppState) -> String {
        state.selected_entry().unwrap().path.clone()
    }

    #[test]
    fn test_select_first_skips_header() {
        let mut state = state();
        state.select_first();
        assert_eq!(selected_path(&state), "alpha.rs");
    }

    #[test]
    fn test_select_last() {
        let mut state = state();
        state.select_last();
        assert_eq!(selected_path(&state), "notes.txt");
    }

    #[test]
    fn test_select_last_falls_back_past_trailing_header() {
        let mut state = state();
        // narrow the filter so the Untracked section loses all items but
        // keeps its header as the trailing row
        state.search_term = ".rs".to_string();
        state.refresh_filter();
        state.select_last();
        assert_eq!(selected_path(&state), "gamma.rs");
    }

    #[test]
    fn test_select_category() {
        let mut state = state();
        state.select_category(Category::Workspace);
        assert_eq!(selected_path(&state), "gamma.rs");

        state.select_category(Category::Untracked);
        assert_eq!(selected_path(&state), "notes.txt");
    }

    #[test]
    fn test_select_category_noop_when_empty() {
        let mut state = state();
        state.select_first();
        state.search_term = "zzz".to_string();
        state.refresh_filter();
        state.select_category(Category::Workspace);
        // nothing visible in the category: selection unchanged
        assert_eq!(state.selected, Some(RowId::new("alpha.rs", Category::Index)));
    }

    #[test]
    fn test_move_down_skips_headers() {
        let mut state = state();
        state.select_first();
        state.move_selection(1, 1);
        assert_eq!(selected_path(&state), "beta.rs");
        // next step crosses the Workspace header
        state.move_selection(1, 1);
        assert_eq!(selected_path(&state), "gamma.rs");
    }

    #[test]
    fn test_move_wraps_at_both_ends() {
        let mut state = state();
        state.select_last();
        state.move_selection(1, 1);
        assert_eq!(selected_path(&state), "alpha.rs");

        state.move_selection(-1, 1);
        assert_eq!(selected_path(&state), "notes.txt");
    }

    #[test]
    fn test_move_with_repeat_count() {
        let mut state = state();
        state.select_first();
        state.move_selection(1, 3);
        assert_eq!(selected_path(&state), "delta.txt");
    }

    #[test]
    fn test_move_equals_select_by_index() {
        // move(+1) applied n times from the first item lands where
        // select_by_index lands on the n-th selectable row
        let item_positions = [1usize, 2, 4, 5, 7];
        for (n, &position) in item_positions.iter().enumerate() {
            let mut walker = state();
            walker.select_first();
            walker.move_selection(1, n);

            let mut jumper = state();
            jumper.select_by_index(position);

            assert_eq!(walker.selected, jumper.selected, "after {n} steps");
        }
    }

    #[test]
    fn test_page_step_overflow_wraps_to_first() {
        let mut state = state();
        state.select_first();
        // +10 from view position 1 overflows the 8-row view and wraps
        state.move_selection(10, 1);
        assert_eq!(selected_path(&state), "alpha.rs");
    }

    #[test]
    fn test_move_past_trailing_header_wraps() {
        let mut state = state();
        state.search_term = ".rs".to_string();
        state.refresh_filter();
        // view: [Index] alpha beta [Workspace] gamma [Untracked]
        state.select_last();
        state.move_selection(1, 1);
        // sliding past the childless trailing header runs off the end
        assert_eq!(selected_path(&state), "alpha.rs");
    }

    #[test]
    fn test_stale_selection_resolves_to_first() {
        let mut state = state();
        state.select_category(Category::Untracked);
        state.search_term = ".rs".to_string();
        state.refresh_filter();
        // notes.txt is filtered out; a move re-resolves instead of stepping
        state.move_selection(1, 1);
        assert_eq!(selected_path(&state), "alpha.rs");
    }

    #[test]
    fn test_selection_ordinal_zero_when_stale() {
        let mut state = state();
        state.select_category(Category::Untracked);
        state.search_term = "zzz".to_string();
        state.refresh_filter();
        assert_eq!(state.selection_ordinal(), 0);
    }

    #[test]
    fn test_select_by_index_skips_header_forward() {
        let mut state = state();
        // view position 3 is the Workspace header
        state.select_by_index(3);
        assert_eq!(selected_path(&state), "gamma.rs");
    }

    #[test]
    fn test_select_by_index_clamps_out_of_bounds() {
        let mut state = state();
        state.select_by_index(99);
        assert_eq!(selected_path(&state), "notes.txt");
    }

    #[test]
    fn test_rebuild_restores_identity() {
        let mut state = state();
        state.select_category(Category::Workspace);

        state.rebuild(&snapshot());
        assert_eq!(selected_path(&state), "gamma.rs");
    }

    #[test]
    fn test_rebuild_falls_back_to_ordinal_when_identity_vanished() {
        let mut state = state();
        state.select_first();
        state.move_selection(1, 1); // beta.rs at view position 2

        // beta.rs got fully staged away; the entry at the old ordinal wins
        let next = StatusSnapshot {
            index: vec![("alpha.rs".to_string(), ChangeKind::Modified)],
            workspace: vec![
                ("gamma.rs".to_string(), ChangeKind::Modified),
                ("delta.txt".to_string(), ChangeKind::Deleted),
            ],
            untracked: vec!["notes.txt".to_string()],
        };
        state.rebuild(&next);
        assert_eq!(selected_path(&state), "gamma.rs");
    }

    #[test]
    fn test_rebuild_empty_store_clears_selection() {
        let mut state = state();
        state.select_first();
        state.rebuild(&StatusSnapshot::default());
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_toggle_mark_at_selection() {
        let mut state = state();
        state.select_first();
        state.toggle_mark_at_selection();
        assert!(state.selected_entry().unwrap().marked);
        state.toggle_mark_at_selection();
        assert!(!state.selected_entry().unwrap().marked);
    }

    #[test]
    fn test_toggle_section_marks_uniform_set() {
        let mut state = state();
        state.select_category(Category::Workspace);
        // pre-mark the other workspace entry: the anchor is unmarked, so
        // the whole section becomes marked
        let delta = state.store.position_of(&RowId::new("delta.txt", Category::Workspace));
        state.store.set_mark(delta.unwrap(), true);

        state.toggle_section_marks();
        assert_eq!(state.store.mark_count(), 2);

        // anchor is now marked: the whole section unmarks
        state.toggle_section_marks();
        assert_eq!(state.store.mark_count(), 0);
    }

    #[test]
    fn test_toggle_section_marks_twice_restores_state() {
        let mut state = state();
        state.select_category(Category::Workspace);
        state.toggle_section_marks();
        state.toggle_section_marks();
        assert_eq!(state.store.mark_count(), 0);
    }

    #[test]
    fn test_visual_mode_marks_anchor_and_landings() {
        let mut state = state();
        state.select_first();
        state.toggle_visual_mode();
        assert!(state.visual_mode);
        assert_eq!(state.store.mark_count(), 1);

        // k steps mark exactly k + 1 distinct rows
        state.move_selection(1, 2);
        assert_eq!(state.store.mark_count(), 3);
    }

    #[test]
    fn test_visual_mode_repeat_move_marks_every_landing() {
        let mut state = state();
        state.select_first();
        state.toggle_visual_mode();
        state.move_selection(1, 4);
        assert_eq!(state.store.mark_count(), 5);
    }

    #[test]
    fn test_cancel_visual_mode_clears_marks() {
        let mut state = state();
        state.select_first();
        state.toggle_visual_mode();
        state.move_selection(1, 2);
        state.cancel_visual_mode();
        assert!(!state.visual_mode);
        assert_eq!(state.store.mark_count(), 0);
    }

    #[test]
    fn test_toggle_visual_off_keeps_marks() {
        let mut state = state();
        state.select_first();
        state.toggle_visual_mode();
        state.move_selection(1, 1);
        state.toggle_visual_mode();
        assert!(!state.visual_mode);
        assert_eq!(state.store.mark_count(), 2);
    }

    #[test]
    fn test_bulk_anchor_skips_marked_rows() {
        let mut state = state();
        state.select_first();
        state.toggle_mark_at_selection(); // alpha.rs marked
        let anchor = state.bulk_anchor().unwrap();
        assert_eq!(anchor, RowId::new("beta.rs", Category::Index));
    }

    #[test]
    fn test_bulk_anchor_none_when_all_marked_after_cursor() {
        let mut state = state();
        state.select_last();
        state.toggle_mark_at_selection();
        assert_eq!(state.bulk_anchor(), None);
    }

    #[test]
    fn test_repeat_prefix_caps_at_seven_digits() {
        let mut state = state();
        for _ in 0..9 {
            state.push_repeat_digit('9');
        }
        assert_eq!(state.repeat_prefix(), "9999999");
        assert_eq!(state.repeat_count(), 9_999_999);
    }

    #[test]
    fn test_repeat_count_defaults_to_one() {
        let mut state = state();
        assert_eq!(state.repeat_count(), 1);
        state.push_repeat_digit('0');
        assert_eq!(state.repeat_count(), 1);
        state.clear_repeat();
        state.push_repeat_digit('4');
        assert_eq!(state.repeat_count(), 4);
    }

    #[test]
    fn test_search_editing_refilters() {
        let mut state = state();
        state.push_search_char('g');
        state.push_search_char('a');
        let items: Vec<&ItemEntry> = state
            .filtered
            .iter()
            .filter_map(|&i| state.store.get(i).and_then(Row::item))
            .collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, "gamma.rs");

        state.pop_search_char();
        state.pop_search_char();
        assert_eq!(state.filtered.len(), state.store.len());
    }

    #[test]
    fn test_clear_search_restores_full_view() {
        let mut state = state();
        state.push_search_char('x');
        state.clear_search();
        assert_eq!(state.filtered.len(), state.store.len());
        assert!(state.search_term.is_empty());
    }
}
