//! src/view/theme.rs
//! ============================================================================
//! # Colors and text styles
//!
//! Catppuccin Mocha accents on the terminal's own background. The cursor and
//! the status line are reversed video, so they stay visible on any palette.

use ratatui::style::{Color, Modifier, Style};

pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

pub fn entry_style(is_directory: bool) -> Style {
    if is_directory {
        Style::default().fg(CYAN)
    } else {
        Style::default()
    }
}

pub fn highlight_style(is_directory: bool) -> Style {
    entry_style(is_directory).add_modifier(Modifier::REVERSED)
}

pub fn status_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn search_style() -> Style {
    status_style().fg(YELLOW).add_modifier(Modifier::BOLD)
}

pub fn manual_border_style() -> Style {
    Style::default().fg(PURPLE)
}

pub fn manual_key_style() -> Style {
    Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
}

pub fn manual_footer_style() -> Style {
    Style::default().fg(COMMENT)
}
