// Dashboard widget modules, one per page plus the two bars.

pub mod comparison;
pub mod help_bar;
pub mod overview;
pub mod search;
pub mod status_bar;
pub mod suggestions;
pub mod value;

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

/// Bordered block with a page title.
pub(crate) fn titled_block(title: String) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(title)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}
