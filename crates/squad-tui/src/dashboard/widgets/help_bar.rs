// Help bar widget: key hints for the current mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::dashboard::{Page, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hint_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn hint_text(state: &ViewState) -> &'static str {
    if state.search_mode {
        return " Type to search | Enter:Done | Esc:Clear | Ctrl+C:Quit";
    }
    match state.page {
        Page::Comparison => {
            " q:Quit | 1-5:Pages | Left/Right:Team | Tab:Switch side"
        }
        _ => " q:Quit | 1-5:Pages | Left/Right:Team | /:Search | r:Role | +/-:Min credits | Esc:Reset",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
