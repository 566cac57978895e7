//! Pagination and column layout.
//!
//! A pure function from (filtered view, selection, viewport height) to a
//! render plan: which window of rows is visible, the vim-style relative
//! line number of every visible item, and the column widths for this frame.
//! Column widths follow the longest path and description currently visible,
//! so they can shift as scrolling reveals different rows.

use crate::core::entries::{EntryStore, Row};

/// One visible row of the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    /// Position of the row in the filtered view
    pub view_index: usize,
    /// Relative line number, counted over item rows only; `None` for headers
    pub relative: Option<usize>,
    /// Whether this row is the current selection
    pub selected: bool,
}

/// Scroll window and per-frame column widths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// First visible filtered-view position
    pub start: usize,
    pub rows: Vec<PlanRow>,
    /// Width of the path column (longest visible path)
    pub path_width: usize,
    /// Width of the description column (longest visible description)
    pub description_width: usize,
}

/// Compute the render plan for one frame.
///
/// The window is positioned so the selected row sits vertically centered:
/// `start = clamp(selected − height/2, 0, max(0, total − height))`, with
/// `start = 0` when everything fits.
pub fn compute(
    store: &EntryStore,
    filtered: &[usize],
    selected_ordinal: usize,
    height: usize,
) -> RenderPlan {
    let total = filtered.len();
    if total == 0 || height == 0 {
        return RenderPlan {
            start: 0,
            rows: Vec::new(),
            path_width: 0,
            description_width: 0,
        };
    }

    let start = if total < height {
        0
    } else {
        let centered = selected_ordinal.saturating_sub(height / 2);
        centered.min(total - height)
    };
    let end = (start + height).min(total);

    // relative numbers are counted over items only, within the window
    let mut item_ordinals = Vec::with_capacity(end - start);
    let mut selected_item = None;
    let mut item_counter = 0usize;
    for view_index in start..end {
        let row = store.get(filtered[view_index]);
        let ordinal = match row {
            Some(Row::Item(_)) => {
                let ordinal = item_counter;
                item_counter += 1;
                if view_index == selected_ordinal {
                    selected_item = Some(ordinal);
                }
                Some(ordinal)
            }
            _ => None,
        };
        item_ordinals.push(ordinal);
    }
    let anchor = selected_item.unwrap_or(0);

    let mut rows = Vec::with_capacity(end - start);
    let mut path_width = 0usize;
    let mut description_width = 0usize;

    for (offset, view_index) in (start..end).enumerate() {
        let row = store.get(filtered[view_index]);
        if let Some(Row::Item(entry)) = row {
            path_width = path_width.max(entry.path.len());
            description_width = description_width.max(entry.kind.description().len());
        }
        rows.push(PlanRow {
            view_index,
            relative: item_ordinals[offset].map(|ordinal| ordinal.abs_diff(anchor)),
            selected: view_index == selected_ordinal,
        });
    }

    RenderPlan {
        start,
        rows,
        path_width,
        description_width,
    }
}
