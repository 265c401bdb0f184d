//! ``src/model/layout.rs``
//! ============================================================================
//! # Grid Layout: index ↔ (column, row) mapping
//!
//! Entries are laid out column-major: the first `rows` entries of a page fill
//! column 0 top to bottom, the next `rows` fill column 1, and so on. A page
//! holds `rows * COLUMNS` entries. Everything here is pure arithmetic on the
//! viewport size.

use std::ops::Range;

/// Fixed number of grid columns.
pub const COLUMNS: usize = 3;

/// Usable screen area: full width, height minus the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: usize,
    height: usize,
}

impl Viewport {
    /// Height is floored at one row so a page never has zero capacity.
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height: if height == 0 { 1 } else { height },
        }
    }

    /// Builds the viewport from the raw terminal size, reserving the last row
    /// for the status line.
    #[must_use]
    pub const fn from_terminal(columns: u16, rows: u16) -> Self {
        Self::new(columns as usize, (rows as usize).saturating_sub(1))
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_terminal(80, 24)
    }
}

/// Position of an entry inside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub column: usize,
    pub row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    viewport: Viewport,
}

impl GridLayout {
    #[must_use]
    pub const fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    /// Rows per column; also the cursor step for left/right moves.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.viewport.height
    }

    #[must_use]
    pub const fn entries_per_page(&self) -> usize {
        self.viewport.height * COLUMNS
    }

    #[must_use]
    pub const fn page_of(&self, index: usize) -> usize {
        index / self.entries_per_page()
    }

    /// Half-open index range of `page`, not clamped to the entry count.
    #[must_use]
    pub const fn page_bounds(&self, page: usize) -> Range<usize> {
        let per_page = self.entries_per_page();
        page * per_page..(page + 1) * per_page
    }

    /// `page_bounds` clamped to `len` entries, ready for slicing.
    #[must_use]
    pub fn visible_range(&self, page: usize, len: usize) -> Range<usize> {
        let bounds = self.page_bounds(page);
        bounds.start.min(len)..bounds.end.min(len)
    }

    #[must_use]
    pub const fn cell_of(&self, local_index: usize) -> Cell {
        Cell {
            column: local_index / self.viewport.height,
            row: local_index % self.viewport.height,
        }
    }

    /// Inverse of [`Self::cell_of`] for a page starting at `head`.
    #[must_use]
    pub const fn index_of(&self, head: usize, cell: Cell) -> usize {
        head + cell.column * self.viewport.height + cell.row
    }

    #[must_use]
    pub const fn cell_width(&self) -> usize {
        self.viewport.width / COLUMNS
    }

    /// Display label for an entry, truncated to fit its cell. Directories
    /// give up one character for the trailing `/`.
    #[must_use]
    pub fn label(&self, name: &str, is_directory: bool) -> String {
        let width = self.cell_width();
        if is_directory {
            let mut label: String = name.chars().take(width.saturating_sub(1)).collect();
            label.push('/');
            label
        } else {
            name.chars().take(width).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: usize, height: usize) -> GridLayout {
        GridLayout::new(Viewport::new(width, height))
    }

    #[test]
    fn test_cursor_47_on_twenty_rows() {
        let grid = layout(90, 20);
        assert_eq!(grid.entries_per_page(), 60);
        assert_eq!(grid.page_of(47), 0);
        assert_eq!(grid.cell_of(47), Cell { column: 2, row: 7 });
    }

    #[test]
    fn test_second_page_is_relative_to_head() {
        let grid = layout(90, 20);
        let head = grid.page_bounds(grid.page_of(75)).start;
        assert_eq!(head, 60);
        assert_eq!(grid.cell_of(75 - head), Cell { column: 0, row: 15 });
    }

    #[test]
    fn test_cell_of_and_index_of_invert_each_other() {
        let grid = layout(120, 7);
        for page in 0..3 {
            let head = grid.page_bounds(page).start;
            for local in 0..grid.entries_per_page() {
                let cell = grid.cell_of(local);
                assert!(cell.column < COLUMNS);
                assert_eq!(grid.index_of(head, cell), head + local);
            }
        }
    }

    #[test]
    fn test_visible_range_clamps_to_len() {
        let grid = layout(90, 4);
        assert_eq!(grid.page_bounds(1), 12..24);
        assert_eq!(grid.visible_range(1, 15), 12..15);
        assert_eq!(grid.visible_range(2, 15), 15..15);
    }

    #[test]
    fn test_zero_height_is_floored() {
        let viewport = Viewport::from_terminal(80, 1);
        assert_eq!(viewport.height(), 1);
        assert_eq!(GridLayout::new(viewport).entries_per_page(), COLUMNS);
    }

    #[test]
    fn test_labels_truncate_by_kind() {
        let grid = layout(18, 10);
        assert_eq!(grid.cell_width(), 6);
        assert_eq!(grid.label("abcdefgh", false), "abcdef");
        assert_eq!(grid.label("abcdefgh", true), "abcde/");
        assert_eq!(grid.label("ab", true), "ab/");
        assert_eq!(grid.label("héllo wörld", false), "héllo ");
    }
}
