// Team overview page: headline numbers, role and credit distributions, the
// strength profile, and the (filtered) player list.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use squad_core::player::PlayerRecord;
use squad_core::profile::StrengthProfile;
use squad_core::report::TeamStats;
use squad_core::stats::{self, NumericField};

use super::{header_style, titled_block};
use crate::dashboard::layout::{columns, header_and_rest};
use crate::dashboard::{Page, ViewState};
use crate::text::fmt_opt;

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(team) = state.overview_team() else {
        let paragraph = Paragraph::new("No teams loaded.")
            .block(titled_block(Page::Overview.title().to_string()));
        frame.render_widget(paragraph, area);
        return;
    };

    let players = state.analyzer.get_team_players(team);
    let stats = state.analyzer.team_stats(team);
    let profile = state.analyzer.strength_profile(team, &state.radar);

    let (metrics_area, rest) = header_and_rest(area, 3);
    let (charts_area, table_area) = header_and_rest(rest, 8);
    let charts = columns(charts_area, 3);

    let metrics = Paragraph::new(metrics_line(&stats, &players)).block(titled_block(format!(
        "{}: {} (Left/Right to change)",
        Page::Overview.title(),
        team
    )));
    frame.render_widget(metrics, metrics_area);

    let roles: Vec<Line> = stats
        .role_distribution
        .iter()
        .map(|c| Line::from(format!("{:<5} {:>3}", c.role.code(), c.count)))
        .collect();
    frame.render_widget(
        Paragraph::new(roles).block(titled_block("Role Distribution".into())),
        charts[0],
    );

    let buckets: Vec<Line> = stats
        .credit_distribution
        .entries()
        .iter()
        .map(|(label, count)| Line::from(format!("{label:<6} {count:>3}")))
        .collect();
    frame.render_widget(
        Paragraph::new(buckets).block(titled_block("Credit Distribution".into())),
        charts[1],
    );

    frame.render_widget(
        Paragraph::new(profile_lines(&profile)).block(titled_block("Team Strength".into())),
        charts[2],
    );

    render_player_table(frame, table_area, state, &players);
}

/// "Total Players: n | Average Credits: x | Max Credits: y | Total Credits: z"
pub fn metrics_line(stats: &TeamStats, players: &[&PlayerRecord]) -> String {
    format!(
        "Total Players: {} | Average Credits: {} | Max Credits: {} | Total Credits: {:.2}",
        stats.total_players,
        fmt_opt(stats.average_credits, 2),
        fmt_opt(stats.max_credits, 2),
        stats::sum(players.iter().copied(), NumericField::Credits),
    )
}

/// One text bar per profile axis, clamped to the bar width.
pub fn profile_lines(profile: &StrengthProfile) -> Vec<Line<'static>> {
    profile
        .axes()
        .iter()
        .map(|(label, value)| {
            let filled = ((value.clamp(0.0, 1.0)) * BAR_WIDTH as f64).round() as usize;
            Line::from(format!(
                "{:<13}{}{} {:>4.0}%",
                label,
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled),
                value * 100.0
            ))
        })
        .collect()
}

fn render_player_table(frame: &mut Frame, area: Rect, state: &ViewState, players: &[&PlayerRecord]) {
    let filtered = state.apply_filters(players);

    let header = Row::new(vec![
        Cell::from("Player Name"),
        Cell::from("Type"),
        Cell::from("Credits"),
        Cell::from("Value"),
        Cell::from("Role Value"),
    ])
    .style(header_style());

    let rows: Vec<Row> = filtered
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.role.to_string()),
                Cell::from(format!("{:.1}", p.credits)),
                Cell::from(format!("{:.2}", p.value_score)),
                Cell::from(format!("{:.2}", p.role_value)),
            ])
        })
        .collect();

    let mut title = format!("Team Players ({})", filtered.len());
    let summary = state.filter_summary();
    if !summary.is_empty() {
        title.push_str(&format!(" [{summary}]"));
    }

    let widths = [
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(11),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(title))
        .style(Style::default().fg(Color::Reset));
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{contains, empty_state, fixture_state, rendered};
    use squad_core::player::Role;

    #[test]
    fn metrics_line_for_team() {
        let state = fixture_state();
        let players = state.analyzer.get_team_players("CSK");
        let line = metrics_line(&state.analyzer.team_stats("CSK"), &players);
        assert_eq!(
            line,
            "Total Players: 3 | Average Credits: 8.50 | Max Credits: 9.00 | Total Credits: 25.50"
        );
    }

    #[test]
    fn profile_bars_clamp_overflow() {
        let profile = StrengthProfile {
            batting: 1.5,
            bowling: 0.5,
            keeping: 0.0,
            all_rounders: 0.25,
            credit_value: None,
        };
        let lines = profile_lines(&profile);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert!(text[0].contains(&"#".repeat(BAR_WIDTH)));
        assert!(text[0].ends_with(" 150%"));
        assert!(text[1].contains(&format!("{}{}", "#".repeat(10), ".".repeat(10))));
        assert!(text[4].contains(&".".repeat(BAR_WIDTH)));
    }

    #[test]
    fn render_shows_selected_team() {
        let state = fixture_state();
        let lines = rendered(120, 30, |frame| render(frame, frame.area(), &state));
        assert!(contains(&lines, "Team Overview: MI"));
        assert!(contains(&lines, "Rohit Sharma"));
        assert!(!contains(&lines, "MS Dhoni"));
    }

    #[test]
    fn render_applies_role_filter() {
        let mut state = fixture_state();
        state.role_filter = Some(Role::Bowler);
        let lines = rendered(120, 30, |frame| render(frame, frame.area(), &state));
        assert!(contains(&lines, "Akash Madhwal"));
        assert!(!contains(&lines, "Rohit Sharma"));
        assert!(contains(&lines, "Team Players (1) [role BOWL]"));
    }

    #[test]
    fn render_without_teams() {
        let state = empty_state();
        let lines = rendered(60, 10, |frame| render(frame, frame.area(), &state));
        assert!(contains(&lines, "No teams loaded."));
    }
}
