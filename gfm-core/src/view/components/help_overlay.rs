//! src/view/components/help_overlay.rs
//!
//! Full-screen key manual, closed by the next key press.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::view::theme;

/// Key column and description, one line per binding.
pub const MANUAL: [(&str, &str); 19] = [
    ("q", "quit"),
    (
        "*",
        "virtual directory(type shell command, and the result of the command is file list",
    ),
    ("ENTER", "run command(type shell command) or insert directory"),
    ("~", "move to home directory"),
    ("BACK SPACE ^H", "move to the parent directory"),
    ("d", "delete file"),
    ("c", "copy file"),
    ("m", "move file"),
    ("n", "new file"),
    ("x", "excute file"),
    ("e", "edit file"),
    ("LEFT h", "move cursor left"),
    ("RIGHT l", "move cursor right"),
    ("DOWN j", "move cursor down"),
    ("UP k", "move cursor up"),
    ("CTRL-L", "reread directory and refresh the window"),
    ("/", "move cursor with searching file"),
    ("?", "this manual"),
    (":", "run shell"),
];

pub struct HelpOverlay;

impl HelpOverlay {
    fn lines() -> Vec<Line<'static>> {
        MANUAL
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(*key, theme::manual_key_style()),
                    Span::raw(" --> "),
                    Span::raw(*description),
                ])
            })
            .collect()
    }
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Manual ")
            .title_alignment(Alignment::Center)
            .title_bottom(Line::styled(" any key to close ", theme::manual_footer_style()))
            .border_style(theme::manual_border_style());

        Paragraph::new(Self::lines()).block(block).render(area, buf);
    }
}
