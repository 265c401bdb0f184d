//! src/view/page_view.rs
//! ============================================================
//! Immutable per-frame picture of the current page: one
//! [`CellView`] per visible entry plus the [`StatusLine`].
//!
//! Built from a `&BrowserState` before drawing, so widgets
//! never reach back into the model. The only I/O here is
//! the directory check made for each visible entry.

use std::fmt;

use crate::model::{
    browser_state::{BrowserState, Listing},
    layout::Cell,
};

/// One visible entry, positioned and labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub cell: Cell,

    /// Truncated name, with `/` for directories
    pub label: String,

    pub is_directory: bool,

    pub is_highlighted: bool,

    /// Global index into the entry list
    pub index: usize,
}

/// Text of the reversed bottom row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Directory path, or the command of a virtual listing
    pub source: String,

    pub page: usize,

    pub count: usize,

    pub head: usize,

    /// Exclusive end of the page, not clamped to `count`
    pub tail: usize,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} page {} files {} head {} tail {} press ? for manual",
            self.source, self.page, self.count, self.head, self.tail
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub cells: Vec<CellView>,
    pub status: StatusLine,
}

impl PageView {
    /// Snapshot of the current page, checking the filesystem for
    /// directories.
    pub fn build(state: &BrowserState) -> Self {
        Self::build_with(state, |index| state.is_directory(index))
    }

    /// Same as [`Self::build`] with a caller-supplied directory test.
    pub fn build_with<F>(state: &BrowserState, mut is_directory: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let layout = state.layout();
        let entries = state.entries();
        let bounds = layout.page_bounds(state.page());
        let visible = layout.visible_range(state.page(), entries.len());

        let cells = visible
            .clone()
            .zip(&entries[visible])
            .map(|(index, name)| {
                let is_dir = is_directory(index);
                CellView {
                    cell: layout.cell_of(index - bounds.start),
                    label: layout.label(name, is_dir),
                    is_directory: is_dir,
                    is_highlighted: index == state.cursor(),
                    index,
                }
            })
            .collect();

        let source = match state.listing() {
            Listing::Directory => state.path().display().to_string(),
            Listing::Virtual { command } => command.clone(),
        };

        Self {
            cells,
            status: StatusLine {
                source,
                page: state.page(),
                count: entries.len(),
                head: bounds.start,
                tail: bounds.end,
            },
        }
    }

    pub fn highlighted(&self) -> Option<&CellView> {
        self.cells.iter().find(|cell| cell.is_highlighted)
    }
}
