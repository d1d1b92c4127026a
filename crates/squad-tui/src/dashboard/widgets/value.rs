// Value analysis page: the best role-weighted picks in the current scope.

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use squad_core::player::PlayerRecord;

use super::{header_style, titled_block};
use crate::dashboard::{Page, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut title = format!("{} (team: {})", Page::Value.title(), state.scope_label());
    let summary = state.filter_summary();
    if !summary.is_empty() {
        title.push_str(&format!(" [{summary}]"));
    }

    let players = value_rows(state);
    if players.is_empty() {
        frame.render_widget(
            Paragraph::new("No players match the current filters.").block(titled_block(title)),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Player Name"),
        Cell::from("Team"),
        Cell::from("Type"),
        Cell::from("Credits"),
        Cell::from("Value Score"),
        Cell::from("Role Value"),
    ])
    .style(header_style());

    let rows: Vec<Row> = players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(p.name.clone()),
                Cell::from(p.team.clone()),
                Cell::from(p.role.to_string()),
                Cell::from(format!("{:.1}", p.credits)),
                Cell::from(format!("{:.2}", p.value_score)),
                Cell::from(format!("{:.2}", p.role_value)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(11),
    ];
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(titled_block(title)),
        area,
    );
}

/// Top value picks for the scope and credit floor, narrowed by role.
pub fn value_rows(state: &ViewState) -> Vec<&PlayerRecord> {
    let picks = state
        .analyzer
        .get_value_players(state.scope_team(), state.min_credits);
    state.apply_filters(&picks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
