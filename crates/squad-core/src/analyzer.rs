// Squad analytics: team lookups, value rankings, comparisons and summaries.
//
// `SquadAnalyzer` owns the immutable dataset. Every query recomputes from the
// table; nothing is cached, so all methods take `&self`.

use std::path::Path;

use crate::dataset::{self, DataLoadError, Dataset};
use crate::player::{PlayerRecord, Role};
use crate::report::{
    ComparisonMetrics, CreditBuckets, CreditDistribution, MatchAnalysis, RoleBalance,
    RolePartition, SquadComposition, TeamComparison, TeamMatchData, TeamSide, TeamStats,
    TeamStrengths, ValueAnalysis, ValueComparison,
};
use crate::stats::{self, count_of, NumericField};
use tracing::debug;

/// Maximum rows returned by `get_value_players`.
pub const VALUE_PLAYERS_LIMIT: usize = 10;
/// Rows in the per-team "top" lists.
pub const TOP_PLAYERS_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("team `{team}` has no players; strength ratios are undefined")]
    DivisionUndefined { team: String },
}

// ---------------------------------------------------------------------------
// SquadAnalyzer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SquadAnalyzer {
    dataset: Dataset,
}

impl SquadAnalyzer {
    pub fn new(dataset: Dataset) -> Self {
        SquadAnalyzer { dataset }
    }

    /// Load the squad table from `path`. Fails if the file is missing,
    /// unreadable, lacks a required column, or has a row with bad credits.
    pub fn from_path(path: &Path) -> Result<Self, DataLoadError> {
        dataset::load_dataset(path).map(Self::new)
    }

    pub fn players(&self) -> &[PlayerRecord] {
        self.dataset.records()
    }

    /// Source column names, for table headers.
    pub fn columns(&self) -> &[String] {
        self.dataset.columns()
    }

    // -- Row-set queries ----------------------------------------------------

    /// Distinct team names in first-appearance order.
    pub fn get_total_teams(&self) -> Vec<String> {
        let mut teams: Vec<String> = Vec::new();
        for p in self.players() {
            if !teams.iter().any(|t| t == &p.team) {
                teams.push(p.team.clone());
            }
        }
        teams
    }

    /// Players whose team matches exactly (case-sensitive).
    pub fn get_team_players(&self, team: &str) -> Vec<&PlayerRecord> {
        self.players().iter().filter(|p| p.team == team).collect()
    }

    /// Split a team into the four role buckets. Unrecognised role codes are
    /// left out of every bucket.
    pub fn get_players_by_role(&self, team: &str) -> RolePartition {
        let mut partition = RolePartition::default();
        let mut skipped = 0usize;
        for p in self.get_team_players(team) {
            let bucket = match p.role {
                Role::WicketKeeper => &mut partition.wicket_keepers,
                Role::Batsman => &mut partition.batsmen,
                Role::Bowler => &mut partition.bowlers,
                Role::AllRounder => &mut partition.all_rounders,
                Role::Other(_) => {
                    skipped += 1;
                    continue;
                }
            };
            bucket.push(p.clone());
        }
        if skipped > 0 {
            debug!("{} players of '{}' have unrecognised roles and were not bucketed", skipped, team);
        }
        partition
    }

    /// Case-insensitive substring search on player names, optionally limited
    /// to one team. Rows without a name never match; an empty query matches
    /// every named row.
    pub fn search_players(&self, query: &str, team: Option<&str>) -> Vec<&PlayerRecord> {
        let needle = query.to_lowercase();
        self.players()
            .iter()
            .filter(|p| p.has_name() && p.name.to_lowercase().contains(&needle))
            .filter(|p| team.map_or(true, |t| p.team == t))
            .collect()
    }

    /// Players with `min <= credits <= max`. An inverted range matches nothing.
    pub fn get_players_by_credit_range(&self, min: f64, max: f64) -> Vec<&PlayerRecord> {
        self.players()
            .iter()
            .filter(|p| p.credits >= min && p.credits <= max)
            .collect()
    }

    /// Up to ten players ranked by role-weighted value, cheapest first.
    pub fn get_value_players(&self, team: Option<&str>, min_credits: f64) -> Vec<&PlayerRecord> {
        let pool = self
            .players()
            .iter()
            .filter(|p| p.credits >= min_credits)
            .filter(|p| team.map_or(true, |t| p.team == t));
        stats::top_n(pool, VALUE_PLAYERS_LIMIT, NumericField::RoleValue)
    }

    // -- Aggregates ---------------------------------------------------------

    pub fn compare_teams(&self, team1: &str, team2: &str) -> TeamComparison {
        let players1 = self.get_team_players(team1);
        let players2 = self.get_team_players(team2);

        let side1 = team_side(team1, &players1);
        let side2 = team_side(team2, &players2);

        let mut role_balance: Vec<RoleBalance> = Vec::new();
        let roles = side1
            .role_distribution
            .iter()
            .chain(side2.role_distribution.iter())
            .map(|c| &c.role);
        for role in roles {
            if role_balance.iter().any(|b| &b.role == role) {
                continue;
            }
            let team1_count = count_of(&side1.role_distribution, role);
            let team2_count = count_of(&side2.role_distribution, role);
            role_balance.push(RoleBalance {
                role: role.clone(),
                team1_count,
                team2_count,
                difference: team1_count as i64 - team2_count as i64,
            });
        }

        let value1 = stats::mean(players1.iter().copied(), NumericField::ValueScore);
        let value2 = stats::mean(players2.iter().copied(), NumericField::ValueScore);

        let comparison = ComparisonMetrics {
            credit_difference: side1.total_credits - side2.total_credits,
            avg_credit_difference: difference(side1.avg_credits, side2.avg_credits),
            role_balance,
            value_comparison: ValueComparison {
                team1_value: value1,
                team2_value: value2,
                value_difference: difference(value1, value2),
            },
        };

        TeamComparison {
            team1: side1,
            team2: side2,
            comparison,
        }
    }

    pub fn analyze_squad_composition(&self, team: &str) -> SquadComposition {
        let players = self.get_team_players(team);
        let it = || players.iter().copied();

        SquadComposition {
            total_players: players.len(),
            credit_distribution: CreditDistribution {
                min: stats::min(it(), NumericField::Credits),
                max: stats::max(it(), NumericField::Credits),
                mean: stats::mean(it(), NumericField::Credits),
                median: stats::median(it(), NumericField::Credits),
                std: stats::population_std(it(), NumericField::Credits),
            },
            role_distribution: stats::role_counts(it()),
            credit_ranges: CreditBuckets::from_players(it()),
            value_analysis: ValueAnalysis {
                avg_value_score: stats::mean(it(), NumericField::ValueScore),
                top_value_players: owned(stats::top_n(
                    it(),
                    TOP_PLAYERS_LIMIT,
                    NumericField::ValueScore,
                )),
            },
        }
    }

    /// Role counts, credit aggregates and per-player ratios for one team.
    /// An empty (or unknown) team has no ratios and is reported as an error.
    pub fn get_team_strengths(&self, team: &str) -> Result<TeamStrengths, AnalysisError> {
        let players = self.get_team_players(team);
        let total_players = players.len();
        if total_players == 0 {
            return Err(AnalysisError::DivisionUndefined {
                team: team.to_string(),
            });
        }
        let it = || players.iter().copied();
        let count = |pred: fn(&Role) -> bool| players.iter().filter(|p| pred(&p.role)).count();

        let batting_strength = count(Role::bats);
        let bowling_strength = count(Role::bowls);
        let keeping_strength = count(|r| *r == Role::WicketKeeper);
        let all_rounder_strength = count(|r| *r == Role::AllRounder);

        let n = total_players as f64;
        Ok(TeamStrengths {
            total_players,
            batting_strength,
            bowling_strength,
            keeping_strength,
            all_rounder_strength,
            total_credits: stats::sum(it(), NumericField::Credits),
            avg_player_credits: stats::sum(it(), NumericField::Credits) / n,
            value_strength: stats::sum(it(), NumericField::ValueScore) / n,
            role_value_strength: stats::sum(it(), NumericField::RoleValue) / n,
            batting_ratio: batting_strength as f64 / n,
            bowling_ratio: bowling_strength as f64 / n,
            keeping_ratio: keeping_strength as f64 / n,
            all_rounder_ratio: all_rounder_strength as f64 / n,
        })
    }

    /// Basic statistics block for one team.
    pub fn team_stats(&self, team: &str) -> TeamStats {
        let players = self.get_team_players(team);
        let it = || players.iter().copied();
        TeamStats {
            total_players: players.len(),
            average_credits: stats::mean(it(), NumericField::Credits),
            max_credits: stats::max(it(), NumericField::Credits),
            role_distribution: stats::role_counts(it()),
            top_players: owned(stats::top_n(it(), TOP_PLAYERS_LIMIT, NumericField::Credits)),
            value_players: owned(stats::top_n(it(), TOP_PLAYERS_LIMIT, NumericField::ValueScore)),
            credit_distribution: CreditBuckets::from_players(it()),
        }
    }

    /// Stats, role partition and strengths for both sides of a fixture.
    pub fn today_match_data(&self, team1: &str, team2: &str) -> Result<MatchAnalysis, AnalysisError> {
        Ok(MatchAnalysis {
            team1: self.match_data(team1)?,
            team2: self.match_data(team2)?,
        })
    }

    fn match_data(&self, team: &str) -> Result<TeamMatchData, AnalysisError> {
        Ok(TeamMatchData {
            name: team.to_string(),
            stats: self.team_stats(team),
            roles: self.get_players_by_role(team),
            strengths: self.get_team_strengths(team)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn team_side(name: &str, players: &[&PlayerRecord]) -> TeamSide {
    let it = || players.iter().copied();
    TeamSide {
        name: name.to_string(),
        total_credits: stats::sum(it(), NumericField::Credits),
        avg_credits: stats::mean(it(), NumericField::Credits),
        role_distribution: stats::role_counts(it()),
        top_5_players: owned(stats::top_n(it(), TOP_PLAYERS_LIMIT, NumericField::Credits)),
        value_players: owned(stats::top_n(it(), TOP_PLAYERS_LIMIT, NumericField::ValueScore)),
    }
}

fn difference(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

fn owned(players: Vec<&PlayerRecord>) -> Vec<PlayerRecord> {
    players.into_iter().cloned().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, team: &str, role: &str, credits: f64) -> PlayerRecord {
        PlayerRecord::new(name, team, Role::from_code(role), credits)
    }

    fn scenario() -> SquadAnalyzer {
        SquadAnalyzer::new(Dataset::from_records(vec![
            p("P1", "TeamA", "BAT", 8.0),
            p("P2", "TeamA", "BOWL", 7.0),
            p("P3", "TeamB", "WK", 9.0),
        ]))
    }

    fn names(players: &[&PlayerRecord]) -> Vec<String> {
        players.iter().map(|p| p.name.clone()).collect()
    }

    fn fixture() -> SquadAnalyzer {
        SquadAnalyzer::new(Dataset::from_records(vec![
            p("Rohit Sharma", "MI", "BAT", 10.5),
            p("Ishan Kishan", "MI", "WK", 9.0),
            p("Hardik Pandya", "MI", "ALL", 9.5),
            p("Jasprit Bumrah", "MI", "BOWL", 9.0),
            p("Tilak Varma", "MI", "BAT", 8.0),
            p("Akash Madhwal", "MI", "BOWL", 4.5),
            p("MS Dhoni", "CSK", "WK", 8.5),
            p("Ravindra Jadeja", "CSK", "ALL", 9.0),
            p("Ruturaj Gaikwad", "CSK", "BAT", 9.5),
            p("Deepak Chahar", "CSK", "BOWL", 8.0),
            p("Moeen Ali", "CSK", "ALL", 8.5),
            p("Net Bowler", "CSK", "SUB", 5.0),
        ]))
    }

    #[test]
    fn total_teams_in_first_appearance_order() {
        assert_eq!(scenario().get_total_teams(), vec!["TeamA", "TeamB"]);
        let interleaved = SquadAnalyzer::new(Dataset::from_records(vec![
            p("a", "X", "BAT", 1.0),
            p("b", "Y", "BAT", 1.0),
            p("c", "X", "BAT", 1.0),
            p("d", "Z", "BAT", 1.0),
        ]));
        assert_eq!(interleaved.get_total_teams(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn team_players_exact_match() {
        let a = scenario();
        assert_eq!(names(&a.get_team_players("TeamA")), vec!["P1", "P2"]);
        assert!(a.get_team_players("teama").is_empty());
        assert!(a.get_team_players("Nope").is_empty());
    }

    #[test]
    fn role_partition_buckets() {
        let a = fixture();
        let roles = a.get_players_by_role("CSK");
        assert_eq!(roles.wicket_keepers.len(), 1);
        assert_eq!(roles.batsmen.len(), 1);
        assert_eq!(roles.bowlers.len(), 1);
        assert_eq!(roles.all_rounders.len(), 2);
        // the SUB player is in no bucket
        let bucketed: usize = roles.labelled().iter().map(|(_, ps)| ps.len()).sum();
        assert_eq!(bucketed, 5);
        assert!(a.get_players_by_role("Unknown").is_empty());
    }

    #[test]
    fn search_is_case_insensitive_and_team_filtered() {
        let a = fixture();
        assert_eq!(names(&a.search_players("SHARMA", None)), vec!["Rohit Sharma"]);
        assert_eq!(
            names(&a.search_players("ja", None)),
            vec!["Jasprit Bumrah", "Ravindra Jadeja"]
        );
        assert_eq!(names(&a.search_players("ja", Some("CSK"))), vec!["Ravindra Jadeja"]);
        assert!(a.search_players("zzz", None).is_empty());
    }

    #[test]
    fn empty_search_returns_every_named_player() {
        let mut records = fixture().players().to_vec();
        records.push(p("", "MI", "BAT", 6.0));
        let a = SquadAnalyzer::new(Dataset::from_records(records));
        assert_eq!(a.search_players("", None).len(), 12);
    }

    #[test]
    fn credit_range_inclusive() {
        let a = scenario();
        assert_eq!(names(&a.get_players_by_credit_range(7.0, 8.0)), vec!["P1", "P2"]);
        assert_eq!(a.get_players_by_credit_range(9.0, 9.0).len(), 1);
        assert!(a.get_players_by_credit_range(9.0, 7.0).is_empty());
    }

    #[test]
    fn value_players_ranked_by_role_value() {
        let a = fixture();
        let top = a.get_value_players(None, 0.0);
        assert_eq!(top.len(), VALUE_PLAYERS_LIMIT);
        assert_eq!(top[0].name, "Akash Madhwal");
        for pair in top.windows(2) {
            assert!(pair[0].role_value >= pair[1].role_value);
        }

        let mi = a.get_value_players(Some("MI"), 9.0);
        assert!(mi.iter().all(|p| p.team == "MI" && p.credits >= 9.0));
        assert_eq!(mi.len(), 4);
        // Bumrah -9.0 beats Kishan -11.7, Pandya -14.25, Sharma -12.6
        assert_eq!(
            names(&mi),
            vec!["Jasprit Bumrah", "Ishan Kishan", "Rohit Sharma", "Hardik Pandya"]
        );
    }

    #[test]
    fn compare_teams_scenario() {
        let cmp = scenario().compare_teams("TeamA", "TeamB");
        assert!((cmp.comparison.credit_difference - 6.0).abs() < 1e-9);
        assert!((cmp.comparison.avg_credit_difference.unwrap() - (-1.5)).abs() < 1e-9);
        assert!((cmp.comparison.value_comparison.value_difference.unwrap() - 1.5).abs() < 1e-9);
        assert_eq!(cmp.team1.top_5_players[0].name, "P1");
        assert_eq!(cmp.team1.value_players[0].name, "P2");

        let wk = cmp
            .comparison
            .role_balance
            .iter()
            .find(|b| b.role == Role::WicketKeeper)
            .unwrap();
        assert_eq!((wk.team1_count, wk.team2_count, wk.difference), (0, 1, -1));
        assert_eq!(cmp.comparison.role_balance.len(), 3);
    }

    #[test]
    fn compare_teams_is_antisymmetric() {
        let a = fixture();
        let ab = a.compare_teams("MI", "CSK");
        let ba = a.compare_teams("CSK", "MI");
        assert!((ab.comparison.credit_difference + ba.comparison.credit_difference).abs() < 1e-9);
        assert!(
            (ab.comparison.avg_credit_difference.unwrap()
                + ba.comparison.avg_credit_difference.unwrap())
            .abs()
                < 1e-9
        );
        for b in &ab.comparison.role_balance {
            let mirrored = ba
                .comparison
                .role_balance
                .iter()
                .find(|m| m.role == b.role)
                .unwrap();
            assert_eq!(b.difference, -mirrored.difference);
        }
    }

    #[test]
    fn compare_with_unknown_team_has_undefined_averages() {
        let cmp = scenario().compare_teams("TeamA", "Nobody");
        assert!((cmp.comparison.credit_difference - 15.0).abs() < 1e-9);
        assert_eq!(cmp.team2.avg_credits, None);
        assert_eq!(cmp.comparison.avg_credit_difference, None);
        assert_eq!(cmp.comparison.value_comparison.value_difference, None);
        assert!(cmp.comparison.role_balance.iter().all(|b| b.team2_count == 0));
    }

    #[test]
    fn squad_composition_numbers() {
        let comp = fixture().analyze_squad_composition("MI");
        assert_eq!(comp.total_players, 6);
        let dist = &comp.credit_distribution;
        assert!((dist.min.unwrap() - 4.5).abs() < 1e-9);
        assert!((dist.max.unwrap() - 10.5).abs() < 1e-9);
        assert!((dist.mean.unwrap() - 8.416_666_666_666_666).abs() < 1e-9);
        assert!((dist.median.unwrap() - 9.0).abs() < 1e-9);
        // population std (divides by n); the sample std would be ~2.0837
        assert!((dist.std.unwrap() - 1.902_118_701_752_221).abs() < 1e-9);
        assert_eq!(comp.credit_ranges.up_to_five, 1);
        assert_eq!(comp.credit_ranges.five_to_ten, 4);
        assert_eq!(comp.credit_ranges.ten_to_fifteen, 1);
        assert_eq!(comp.credit_ranges.over_fifteen, 0);
        assert_eq!(comp.value_analysis.top_value_players.len(), 5);
        assert_eq!(comp.value_analysis.top_value_players[0].name, "Akash Madhwal");
    }

    #[test]
    fn squad_composition_of_unknown_team() {
        let comp = fixture().analyze_squad_composition("Nope");
        assert_eq!(comp.total_players, 0);
        assert_eq!(comp.credit_distribution.mean, None);
        assert_eq!(comp.credit_distribution.std, None);
        assert_eq!(comp.credit_ranges.total(), 0);
        assert!(comp.role_distribution.is_empty());
        assert_eq!(comp.value_analysis.avg_value_score, None);
    }

    #[test]
    fn team_strengths_double_count_all_rounders() {
        let s = fixture().get_team_strengths("CSK").unwrap();
        assert_eq!(s.total_players, 6);
        assert_eq!(s.batting_strength, 3);
        assert_eq!(s.bowling_strength, 3);
        assert_eq!(s.keeping_strength, 1);
        assert_eq!(s.all_rounder_strength, 2);
        assert!((s.total_credits - 48.5).abs() < 1e-9);
        assert!((s.batting_ratio - 0.5).abs() < 1e-9);
        assert!((s.keeping_ratio - 1.0 / 6.0).abs() < 1e-9);
        assert!((s.value_strength + 48.5 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn team_strengths_of_empty_team_is_division_undefined() {
        let err = scenario().get_team_strengths("Nobody").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DivisionUndefined {
                team: "Nobody".into()
            }
        );
    }

    #[test]
    fn match_data_composes_primitives() {
        let a = fixture();
        let m = a.today_match_data("MI", "CSK").unwrap();
        assert_eq!(m.team1.name, "MI");
        assert_eq!(m.team1.stats.total_players, 6);
        assert!((m.team1.stats.max_credits.unwrap() - 10.5).abs() < 1e-9);
        assert_eq!(m.team1.stats.top_players[0].name, "Rohit Sharma");
        assert_eq!(m.team2.roles, a.get_players_by_role("CSK"));
        assert_eq!(m.team2.strengths, a.get_team_strengths("CSK").unwrap());
        assert!(a.today_match_data("MI", "Nobody").is_err());
    }
}
