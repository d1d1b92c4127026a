// Team comparison page: one panel per side plus the comparison metrics.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use squad_core::report::{ComparisonMetrics, TeamSide};

use super::titled_block;
use crate::dashboard::layout::{columns, header_and_rest};
use crate::dashboard::{Page, ViewState};
use crate::text::fmt_opt;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some((team1, team2)) = state.compare_teams() else {
        let paragraph = Paragraph::new("No teams loaded.")
            .block(titled_block(Page::Comparison.title().to_string()));
        frame.render_widget(paragraph, area);
        return;
    };

    let cmp = state.analyzer.compare_teams(team1, team2);
    let metrics_height = 6 + cmp.comparison.role_balance.len() as u16;
    let (sides_area, metrics_area) =
        header_and_rest(area, area.height.saturating_sub(metrics_height));
    let sides = columns(sides_area, 2);

    for (i, side) in [&cmp.team1, &cmp.team2].into_iter().enumerate() {
        let active = i == state.compare_side;
        let marker = if active { "> " } else { "" };
        let mut block = titled_block(format!("{marker}{}", side.name));
        if active {
            block = block.border_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
        frame.render_widget(Paragraph::new(side_lines(side)).block(block), sides[i]);
    }

    let title = format!("{}: {team1} vs {team2}", Page::Comparison.title());
    frame.render_widget(
        Paragraph::new(metric_lines(&cmp.comparison, team1, team2)).block(titled_block(title)),
        metrics_area,
    );
}

pub fn side_lines(side: &TeamSide) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!("Total Credits: {:.2}", side.total_credits)),
        Line::from(format!("Average Credits: {}", fmt_opt(side.avg_credits, 2))),
        Line::from(""),
        Line::from("Role Distribution:"),
    ];
    lines.extend(
        side.role_distribution
            .iter()
            .map(|c| Line::from(format!("- {}: {}", c.role, c.count))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from("Top Players:"));
    lines.extend(side.top_5_players.iter().map(|p| {
        Line::from(format!("- {} ({}) - {:.1} credits", p.name, p.role, p.credits))
    }));
    lines
}

pub fn metric_lines(metrics: &ComparisonMetrics, team1: &str, team2: &str) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!("Credit Difference: {:.2}", metrics.credit_difference)),
        Line::from(format!(
            "Average Credit Difference: {}",
            fmt_opt(metrics.avg_credit_difference, 2)
        )),
        Line::from(format!(
            "Value Difference: {}",
            fmt_opt(metrics.value_comparison.value_difference, 2)
        )),
        Line::from(format!("Role Balance Score: {}", metrics.role_balance_score())),
    ];
    lines.extend(metrics.role_balance.iter().map(|b| {
        Line::from(format!(
            "  {:<5} {team1} {:>2} | {team2} {:>2} | diff {:+}",
            b.role.code(),
            b.team1_count,
            b.team2_count,
            b.difference
        ))
    }));
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{contains, empty_state, fixture_state, rendered};

    #[test]
    fn metric_lines_include_balance_score() {
        let state = fixture_state();
        let cmp = state.analyzer.compare_teams("MI", "CSK");
        let text: Vec<String> = metric_lines(&cmp.comparison, "MI", "CSK")
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(text[0], "Credit Difference: 8.00");
        assert_eq!(text[3], "Role Balance Score: 1");
        assert!(text.iter().any(|l| l.contains("BAT") && l.contains("diff +1")));
    }

    #[test]
    fn side_lines_list_top_players() {
        let state = fixture_state();
        let cmp = state.analyzer.compare_teams("MI", "CSK");
        let text: Vec<String> = side_lines(&cmp.team2).iter().map(|l| l.to_string()).collect();
        assert_eq!(text[0], "Total Credits: 25.50");
        assert!(text.contains(&"- Ravindra Jadeja (ALL) - 9.0 credits".to_string()));
    }

    #[test]
    fn render_marks_active_side() {
        let mut state = fixture_state();
        state.compare_side = 1;
        let lines = rendered(120, 30, |frame| render(frame, frame.area(), &state));
        assert!(contains(&lines, "> CSK"));
        assert!(contains(&lines, "Team Comparison: MI vs CSK"));
    }

    #[test]
    fn render_without_teams() {
        let state = empty_state();
        let lines = rendered(60, 10, |frame| render(frame, frame.area(), &state));
        assert!(contains(&lines, "No teams loaded."));
    }
}
