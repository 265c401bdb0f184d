//! src/view/components/status_bar.rs
//!
//! The reversed last row: path or virtual command, page, entry count, and
//! page bounds. While searching, the query follows in its own style.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::view::{page_view::StatusLine, theme};

pub struct StatusBar<'a> {
    status: &'a StatusLine,
    search_query: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: &'a StatusLine, search_query: Option<&'a str>) -> Self {
        Self {
            status,
            search_query,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(self.status.to_string(), theme::status_style())];
        if let Some(query) = self.search_query {
            spans.push(Span::styled(format!(" /{query}"), theme::search_style()));
        }

        Paragraph::new(Line::from(spans))
            .style(theme::status_style())
            .render(area, buf);
    }
}
