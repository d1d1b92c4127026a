// Fantasy suggestions page.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use squad_core::suggestions::FantasySuggestions;

use super::{header_style, titled_block};
use crate::dashboard::{Page, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let picks = state
        .analyzer
        .fantasy_suggestions(state.scope_team(), &state.quotas);
    let title = format!(
        "{} (team: {}, {} players)",
        Page::Suggestions.title(),
        state.scope_label(),
        picks.player_count()
    );
    frame.render_widget(
        Paragraph::new(suggestion_lines(&picks)).block(titled_block(title)),
        area,
    );
}

pub fn suggestion_lines(picks: &FantasySuggestions) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for group in &picks.groups {
        lines.push(Line::from(Span::styled(
            format!("{} ({} players)", group.label, group.players.len()),
            header_style(),
        )));
        if group.players.is_empty() {
            lines.push(Line::from("  none available"));
        }
        lines.extend(group.players.iter().map(|p| {
            Line::from(format!("  {:<24} {:<6} {:>5.1}", p.name, p.team, p.credits))
        }));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!("Total Team Credits: {:.2}", picks.total_credits),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
