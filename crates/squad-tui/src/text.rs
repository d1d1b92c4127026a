// Plain-text renderings of the analyzer's reports.
//
// Every function here returns a `String` so the menu can write it to any
// stream and tests can assert on it directly. Tables use comfy-table's
// ASCII grid preset.

use comfy_table::presets::ASCII_FULL;
use comfy_table::Table;

use squad_core::player::PlayerRecord;
use squad_core::report::{
    MatchAnalysis, RolePartition, SquadComposition, TeamComparison, TeamStats, TeamStrengths,
};
use squad_core::stats::RoleCount;

const RULE_WIDTH: usize = 50;

/// Format an optional statistic; undefined values read `n/a`.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "n/a".to_string(),
    }
}

pub fn header(text: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n{text}\n{rule}\n")
}

pub fn subheader(text: &str) -> String {
    format!("\n{text}\n{}", "-".repeat(30))
}

// ---------------------------------------------------------------------------
// Player tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Team,
    Role,
    Credits,
    ValueScore,
    RoleValue,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Player Name",
            Column::Team => "Team",
            Column::Role => "Player Type",
            Column::Credits => "Credits",
            Column::ValueScore => "value_score",
            Column::RoleValue => "role_value",
        }
    }

    pub fn cell(self, p: &PlayerRecord) -> String {
        match self {
            Column::Name => p.name.clone(),
            Column::Team => p.team.clone(),
            Column::Role => p.role.to_string(),
            Column::Credits => format!("{:.1}", p.credits),
            Column::ValueScore => format!("{:.2}", p.value_score),
            Column::RoleValue => format!("{:.2}", p.role_value),
        }
    }
}

pub const TEAM_COLUMNS: &[Column] = &[Column::Name, Column::Role, Column::Credits];
pub const LISTING_COLUMNS: &[Column] = &[Column::Name, Column::Team, Column::Role, Column::Credits];
pub const VALUE_COLUMNS: &[Column] = &[
    Column::Name,
    Column::Team,
    Column::Role,
    Column::Credits,
    Column::ValueScore,
];
/// Value listing ranked by role-weighted value, so that column is shown too.
pub const RANKED_COLUMNS: &[Column] = &[
    Column::Name,
    Column::Team,
    Column::Role,
    Column::Credits,
    Column::ValueScore,
    Column::RoleValue,
];

pub fn player_table<'a, I>(players: I, columns: &[Column]) -> String
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(columns.iter().map(|c| c.header()));
    for p in players {
        table.add_row(columns.iter().map(|c| c.cell(p)));
    }
    table.to_string()
}

fn role_lines(counts: &[RoleCount], prefix: &str, suffix: &str) -> Vec<String> {
    counts
        .iter()
        .map(|c| format!("{prefix}{}: {}{suffix}", c.role, c.count))
        .collect()
}

fn partition_lines(roles: &RolePartition) -> Vec<String> {
    roles
        .labelled()
        .iter()
        .map(|(label, players)| format!("{label}: {} players", players.len()))
        .collect()
}

// ---------------------------------------------------------------------------
// Report renderings
// ---------------------------------------------------------------------------

/// Menu option 1: basic numbers, role buckets and the five priciest players.
pub fn team_statistics(team: &str, stats: &TeamStats, roles: &RolePartition) -> String {
    let mut out = vec![header(&format!("Team Statistics: {team}"))];
    out.push(subheader("Basic Statistics"));
    out.push(format!("Total Players: {}", stats.total_players));
    out.push(format!("Average Credits: {}", fmt_opt(stats.average_credits, 2)));
    out.push(subheader("Role Distribution"));
    out.extend(partition_lines(roles));
    out.push(subheader("Top Players"));
    out.push(player_table(&stats.top_players, TEAM_COLUMNS));
    out.join("\n")
}

pub fn team_comparison(cmp: &TeamComparison) -> String {
    let (t1, t2) = (&cmp.team1.name, &cmp.team2.name);
    let metrics = &cmp.comparison;

    let mut out = vec![header(&format!("Team Comparison: {t1} vs {t2}"))];
    out.push(subheader("Comparison Metrics"));
    out.push(format!("Credit Difference: {:.2}", metrics.credit_difference));
    out.push(format!(
        "Average Credit Difference: {}",
        fmt_opt(metrics.avg_credit_difference, 2)
    ));
    out.push(format!(
        "Value Difference: {}",
        fmt_opt(metrics.value_comparison.value_difference, 2)
    ));
    out.push(format!("Role Balance Score: {}", metrics.role_balance_score()));

    out.push(subheader("Role Comparison"));
    for b in &metrics.role_balance {
        out.push(format!("{}:", b.role));
        out.push(format!("  {t1}: {}", b.team1_count));
        out.push(format!("  {t2}: {}", b.team2_count));
        out.push(format!("  Difference: {}", b.difference));
    }
    out.join("\n")
}

pub fn squad_composition(team: &str, comp: &SquadComposition) -> String {
    let mut out = vec![header(&format!("Squad Analysis: {team}"))];
    out.push(subheader("Basic Statistics"));
    out.push(format!("Total Players: {}", comp.total_players));

    let dist = &comp.credit_distribution;
    out.push(format!(
        "Credits: min {} / median {} / max {} (mean {}, std {})",
        fmt_opt(dist.min, 1),
        fmt_opt(dist.median, 1),
        fmt_opt(dist.max, 1),
        fmt_opt(dist.mean, 2),
        fmt_opt(dist.std, 2),
    ));

    out.push(subheader("Credit Distribution"));
    for (range, count) in comp.credit_ranges.entries() {
        out.push(format!("{range}: {count} players"));
    }

    out.push(subheader("Role Distribution"));
    out.extend(role_lines(&comp.role_distribution, "", " players"));

    out.push(subheader("Value Analysis"));
    out.push(format!(
        "Average Value Score: {}",
        fmt_opt(comp.value_analysis.avg_value_score, 2)
    ));
    out.push("\nTop Value Players:".to_string());
    out.push(player_table(&comp.value_analysis.top_value_players, VALUE_COLUMNS));
    out.join("\n")
}

/// Strength breakdown with each role count shown as a share of the squad.
pub fn team_strengths(team: &str, s: &TeamStrengths) -> String {
    let pct = |ratio: f64| ratio * 100.0;
    let rule = "-".repeat(RULE_WIDTH);
    let lines = [
        header(&format!("Team Strengths Analysis: {team}")),
        "Player Distribution:".to_string(),
        format!("Total Players: {}", s.total_players),
        format!("Batsmen: {} ({:.1}%)", s.batting_strength, pct(s.batting_ratio)),
        format!("Bowlers: {} ({:.1}%)", s.bowling_strength, pct(s.bowling_ratio)),
        format!("Wicket Keepers: {} ({:.1}%)", s.keeping_strength, pct(s.keeping_ratio)),
        format!(
            "All-rounders: {} ({:.1}%)",
            s.all_rounder_strength,
            pct(s.all_rounder_ratio)
        ),
        String::new(),
        "Credit Analysis:".to_string(),
        format!("Total Credits: {:.1}", s.total_credits),
        format!("Average Player Credits: {:.1}", s.avg_player_credits),
        String::new(),
        "Value Analysis:".to_string(),
        format!("Average Value Score: {:.2}", s.value_strength),
        format!("Average Role Value: {:.2}", s.role_value_strength),
        String::new(),
        rule,
    ];
    lines.join("\n")
}

/// Both sides of a fixture: stats, roles, top and value players, credit bins.
pub fn match_analysis(m: &MatchAnalysis) -> String {
    let mut out = vec![header(&format!(
        "Match Analysis: {} vs {}",
        m.team1.name, m.team2.name
    ))];

    for side in [&m.team1, &m.team2] {
        let stats = &side.stats;
        out.push(format!("{} Analysis:", side.name));
        out.push(format!("Total Players: {}", stats.total_players));
        out.push(format!("Average Credits: {}", fmt_opt(stats.average_credits, 2)));
        out.push(format!("Maximum Credits: {}", fmt_opt(stats.max_credits, 1)));

        out.push("\nRole Distribution:".to_string());
        out.extend(role_lines(&stats.role_distribution, "- ", ""));

        out.push("\nTop Players:".to_string());
        for p in &stats.top_players {
            out.push(format!("- {} ({}) - {:.1} credits", p.name, p.role, p.credits));
        }

        out.push("\nValue Players:".to_string());
        for p in &stats.value_players {
            out.push(format!(
                "- {} ({}) - {:.1} credits (Value Score: {:.2})",
                p.name, p.role, p.credits, p.value_score
            ));
        }

        out.push("\nCredit Distribution:".to_string());
        for (range, count) in stats.credit_distribution.entries() {
            out.push(format!("- {range}: {count} players"));
        }

        let strengths = &side.strengths;
        out.push(format!(
            "\nStrengths: {} batting / {} bowling / {} keeping / {} all-round",
            strengths.batting_strength,
            strengths.bowling_strength,
            strengths.keeping_strength,
            strengths.all_rounder_strength
        ));
        out.push(format!("\n{}", "-".repeat(RULE_WIDTH)));
    }
    out.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use squad_core::dataset::Dataset;
    use squad_core::player::Role;
    use squad_core::SquadAnalyzer;

    fn analyzer() -> SquadAnalyzer {
        SquadAnalyzer::new(Dataset::from_records(vec![
            PlayerRecord::new("Rohit Sharma", "MI", Role::Batsman, 10.5),
            PlayerRecord::new("Ishan Kishan", "MI", Role::WicketKeeper, 9.0),
            PlayerRecord::new("Jasprit Bumrah", "MI", Role::Bowler, 9.5),
            PlayerRecord::new("MS Dhoni", "CSK", Role::WicketKeeper, 8.5),
            PlayerRecord::new("Ravindra Jadeja", "CSK", Role::AllRounder, 9.0),
        ]))
    }

    #[test]
    fn fmt_opt_renders_none_as_na() {
        assert_eq!(fmt_opt(Some(8.456), 2), "8.46");
        assert_eq!(fmt_opt(Some(9.0), 1), "9.0");
        assert_eq!(fmt_opt(None, 2), "n/a");
    }

    #[test]
    fn player_table_has_headers_and_rows() {
        let a = analyzer();
        let table = player_table(a.get_team_players("CSK"), LISTING_COLUMNS);
        assert!(table.contains("Player Name"));
        assert!(table.contains("Player Type"));
        assert!(table.contains("MS Dhoni"));
        assert!(table.contains("8.5"));
        assert!(!table.contains("Rohit"));
    }

    #[test]
    fn ranked_table_shows_role_value() {
        let a = analyzer();
        let table = player_table(a.get_value_players(Some("CSK"), 0.0), RANKED_COLUMNS);
        assert!(table.contains("role_value"));
        // Jadeja: -9.0 * 1.5
        assert!(table.contains("-13.50"));
    }

    #[test]
    fn strengths_text_uses_real_player_total() {
        let a = analyzer();
        let text = team_strengths("CSK", &a.get_team_strengths("CSK").unwrap());
        assert!(text.contains("Team Strengths Analysis: CSK"));
        // Jadeja bats and bowls, Dhoni does neither: total stays 2
        assert!(text.contains("Total Players: 2"));
        assert!(text.contains("Batsmen: 1 (50.0%)"));
        assert!(text.contains("Wicket Keepers: 1 (50.0%)"));
        assert!(text.contains("Total Credits: 17.5"));
    }

    #[test]
    fn match_analysis_covers_both_sides() {
        let a = analyzer();
        let text = match_analysis(&a.today_match_data("MI", "CSK").unwrap());
        assert!(text.contains("Match Analysis: MI vs CSK"));
        assert!(text.contains("MI Analysis:"));
        assert!(text.contains("CSK Analysis:"));
        assert!(text.contains("- Rohit Sharma (BAT) - 10.5 credits"));
        assert!(text.contains("(Value Score: -8.50)"));
        assert!(text.contains("- 5-10: 2 players"));
        assert!(text.contains("Maximum Credits: 10.5"));
    }

    #[test]
    fn comparison_text_with_empty_side() {
        let a = analyzer();
        let text = team_comparison(&a.compare_teams("MI", "Nobody"));
        assert!(text.contains("Credit Difference: 29.00"));
        assert!(text.contains("Average Credit Difference: n/a"));
        assert!(text.contains("Role Balance Score: 3"));
    }

    #[test]
    fn composition_of_unknown_team_shows_na() {
        let a = analyzer();
        let text = squad_composition("Nobody", &a.analyze_squad_composition("Nobody"));
        assert!(text.contains("Total Players: 0"));
        assert!(text.contains("Average Value Score: n/a"));
        assert!(text.contains("15+: 0 players"));
    }

    #[test]
    fn team_statistics_lists_role_buckets() {
        let a = analyzer();
        let text = team_statistics("MI", &a.team_stats("MI"), &a.get_players_by_role("MI"));
        assert!(text.contains("Wicket Keeper: 1 players"));
        assert!(text.contains("All-rounder: 0 players"));
        assert!(text.contains("Average Credits: 9.67"));
    }
}
