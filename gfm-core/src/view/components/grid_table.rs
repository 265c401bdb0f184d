//! src/view/components/grid_table.rs
//!
//! Paints the cells of a [`PageView`] column-major into the main area.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::view::{page_view::PageView, theme};

pub struct GridTable<'a> {
    view: &'a PageView,
    cell_width: usize,
}

impl<'a> GridTable<'a> {
    pub fn new(view: &'a PageView, cell_width: usize) -> Self {
        Self { view, cell_width }
    }
}

impl Widget for GridTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for cell_view in &self.view.cells {
            let x = area.x as usize + cell_view.cell.column * self.cell_width;
            let y = area.y as usize + cell_view.cell.row;
            if x >= area.right() as usize || y >= area.bottom() as usize {
                continue;
            }

            let style = if cell_view.is_highlighted {
                theme::highlight_style(cell_view.is_directory)
            } else {
                theme::entry_style(cell_view.is_directory)
            };

            // Labels are already cut to the cell; only the screen edge limits here.
            let room = area.right() as usize - x;
            buf.set_stringn(x as u16, y as u16, &cell_view.label, room, style);
        }
    }
}
