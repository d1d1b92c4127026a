// Player search page: query box and the filtered result table.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use squad_core::player::PlayerRecord;

use super::{header_style, titled_block};
use crate::dashboard::layout::header_and_rest;
use crate::dashboard::{Page, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (input_area, results_area) = header_and_rest(area, 3);

    let cursor = if state.search_mode { "_" } else { "" };
    let input_style = if state.search_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(format!("{}{cursor}", state.search_text))
        .style(input_style)
        .block(titled_block(format!(
            "{} (team: {}, / to type)",
            Page::Search.title(),
            state.scope_label()
        )));
    frame.render_widget(input, input_area);

    let results = search_results(state);
    if results.is_empty() {
        let empty = Paragraph::new("No players found matching your search criteria")
            .block(titled_block("Results".into()));
        frame.render_widget(empty, results_area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Player Name"),
        Cell::from("Team"),
        Cell::from("Type"),
        Cell::from("Credits"),
    ])
    .style(header_style());

    let rows: Vec<Row> = results
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.team.clone()),
                Cell::from(p.role.to_string()),
                Cell::from(format!("{:.1}", p.credits)),
            ])
        })
        .collect();

    let mut title = format!("Found {} players", results.len());
    let summary = state.filter_summary();
    if !summary.is_empty() {
        title.push_str(&format!(" [{summary}]"));
    }

    let widths = [
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(8),
    ];
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(titled_block(title)),
        results_area,
    );
}

/// Name search within the current team scope, then the role and credit
/// filters.
pub fn search_results(state: &ViewState) -> Vec<&PlayerRecord> {
    let matches = state
        .analyzer
        .search_players(&state.search_text, state.scope_team());
    state.apply_filters(&matches)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{contains, fixture_state, rendered};
    use squad_core::player::Role;

    fn names(state: &ViewState) -> Vec<String> {
        search_results(state).iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn empty_query_lists_everyone() {
        let state = fixture_state();
        assert_eq!(search_results(&state).len(), 8);
    }

    #[test]
    fn query_scope_and_filters_combine() {
        let mut state = fixture_state();
        state.search_text = "A".into();
        // everyone but "MS Dhoni"
        assert_eq!(names(&state).len(), 7);
        state.scope = 2; // CSK
        assert_eq!(names(&state), vec!["Ravindra Jadeja", "Deepak Chahar"]);
        state.role_filter = Some(Role::Bowler);
        assert_eq!(names(&state), vec!["Deepak Chahar"]);
        state.min_credits = 8.5;
        assert!(names(&state).is_empty());
    }

    #[test]
    fn render_lists_results() {
        let mut state = fixture_state();
        state.search_text = "sharma".into();
        let lines = rendered(100, 12, |frame| render(frame, frame.area(), &state));
        assert!(contains(&lines, "Player Search (team: All"));
        assert!(contains(&lines, "Found 1 players"));
        assert!(contains(&lines, "Rohit Sharma"));
    }

    #[test]
    fn render_shows_cursor_in_search_mode() {
        let mut state = fixture_state();
        state.search_mode = true;
        state.search_text = "zz".into();
        let lines = rendered(100, 12, |frame| render(frame, frame.area(), &state));
        assert!(contains(&lines, "zz_"));
        assert!(contains(&lines, "No players found matching your search criteria"));
    }
}
