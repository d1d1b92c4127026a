// Status bar widget: app title, page tabs, last-updated timestamp.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::dashboard::{Page, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        " Squad Analyzer ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(state.page));
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        format!(
            "Last Updated: {}",
            state.last_updated.format("%Y-%m-%d %H:%M:%S")
        ),
        Style::default().fg(Color::Gray),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "[1:Overview] [2:Compare] ..." with the active page highlighted.
pub fn tab_spans(active: Page) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, page) in Page::ALL.into_iter().enumerate() {
        let style = if page == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("[{}:{}]", i + 1, page.tab_label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{contains, fixture_state, rendered};

    #[test]
    fn tab_spans_highlight_active() {
        let spans = tab_spans(Page::Search);
        // 0=[1:Overview], 1=" ", 2=[2:Compare], 3=" ", 4=[3:Search]
        assert!(spans[4].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn tab_spans_contain_labels() {
        let labels: Vec<String> = tab_spans(Page::Overview)
            .iter()
            .step_by(2)
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(
            labels,
            vec!["[1:Overview]", "[2:Compare]", "[3:Search]", "[4:Value]", "[5:Fantasy]"]
        );
    }

    #[test]
    fn render_shows_timestamp() {
        let state = fixture_state();
        let lines = rendered(140, 1, |frame| render(frame, frame.area(), &state));
        assert!(contains(&lines, "Last Updated: "));
        assert!(contains(&lines, "[1:Overview]"));
    }
}
