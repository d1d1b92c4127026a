// Report structures returned by the analyzer.
//
// These are plain data: every number is filled in by `SquadAnalyzer`.
// Undefined statistics (empty team) are `None`.

use crate::player::{PlayerRecord, Role};
use crate::stats::RoleCount;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Credit buckets
// ---------------------------------------------------------------------------

/// Fixed credit histogram bins. The first bin is closed on both ends, the
/// rest are left-open and right-closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditBucket {
    UpToFive,
    FiveToTen,
    TenToFifteen,
    OverFifteen,
}

impl CreditBucket {
    pub fn of(credits: f64) -> Self {
        if credits <= 5.0 {
            CreditBucket::UpToFive
        } else if credits <= 10.0 {
            CreditBucket::FiveToTen
        } else if credits <= 15.0 {
            CreditBucket::TenToFifteen
        } else {
            CreditBucket::OverFifteen
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreditBucket::UpToFive => "0-5",
            CreditBucket::FiveToTen => "5-10",
            CreditBucket::TenToFifteen => "10-15",
            CreditBucket::OverFifteen => "15+",
        }
    }
}

/// Player counts per credit bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CreditBuckets {
    #[serde(rename = "0-5")]
    pub up_to_five: usize,
    #[serde(rename = "5-10")]
    pub five_to_ten: usize,
    #[serde(rename = "10-15")]
    pub ten_to_fifteen: usize,
    #[serde(rename = "15+")]
    pub over_fifteen: usize,
}

impl CreditBuckets {
    pub fn from_players<'a, I>(players: I) -> Self
    where
        I: IntoIterator<Item = &'a PlayerRecord>,
    {
        let mut buckets = CreditBuckets::default();
        for p in players {
            match CreditBucket::of(p.credits) {
                CreditBucket::UpToFive => buckets.up_to_five += 1,
                CreditBucket::FiveToTen => buckets.five_to_ten += 1,
                CreditBucket::TenToFifteen => buckets.ten_to_fifteen += 1,
                CreditBucket::OverFifteen => buckets.over_fifteen += 1,
            }
        }
        buckets
    }

    /// `(label, count)` pairs in bucket order.
    pub fn entries(&self) -> [(&'static str, usize); 4] {
        [
            (CreditBucket::UpToFive.label(), self.up_to_five),
            (CreditBucket::FiveToTen.label(), self.five_to_ten),
            (CreditBucket::TenToFifteen.label(), self.ten_to_fifteen),
            (CreditBucket::OverFifteen.label(), self.over_fifteen),
        ]
    }

    pub fn total(&self) -> usize {
        self.up_to_five + self.five_to_ten + self.ten_to_fifteen + self.over_fifteen
    }
}

// ---------------------------------------------------------------------------
// Role partition
// ---------------------------------------------------------------------------

/// A team roster split into the four recognised role buckets.
///
/// Players with an unrecognised role code are not in any bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RolePartition {
    #[serde(rename = "Wicket Keeper")]
    pub wicket_keepers: Vec<PlayerRecord>,
    #[serde(rename = "Batsman")]
    pub batsmen: Vec<PlayerRecord>,
    #[serde(rename = "Bowler")]
    pub bowlers: Vec<PlayerRecord>,
    #[serde(rename = "All-rounder")]
    pub all_rounders: Vec<PlayerRecord>,
}

impl RolePartition {
    /// `(label, players)` pairs in display order.
    pub fn labelled(&self) -> [(&'static str, &[PlayerRecord]); 4] {
        [
            ("Wicket Keeper", self.wicket_keepers.as_slice()),
            ("Batsman", self.batsmen.as_slice()),
            ("Bowler", self.bowlers.as_slice()),
            ("All-rounder", self.all_rounders.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.labelled().iter().all(|(_, ps)| ps.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Team comparison
// ---------------------------------------------------------------------------

/// One side of a two-team comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSide {
    pub name: String,
    pub total_credits: f64,
    pub avg_credits: Option<f64>,
    pub role_distribution: Vec<RoleCount>,
    /// Five most expensive players.
    pub top_5_players: Vec<PlayerRecord>,
    /// Five cheapest players (largest value score).
    pub value_players: Vec<PlayerRecord>,
}

/// Head-to-head role count for one role code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleBalance {
    pub role: Role,
    pub team1_count: usize,
    pub team2_count: usize,
    pub difference: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueComparison {
    pub team1_value: Option<f64>,
    pub team2_value: Option<f64>,
    pub value_difference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    /// `total1 - total2`.
    pub credit_difference: f64,
    /// `avg1 - avg2`; undefined if either team is empty.
    pub avg_credit_difference: Option<f64>,
    pub role_balance: Vec<RoleBalance>,
    pub value_comparison: ValueComparison,
}

impl ComparisonMetrics {
    /// Sum of absolute per-role differences. Zero means identical role mix.
    pub fn role_balance_score(&self) -> i64 {
        self.role_balance.iter().map(|b| b.difference.abs()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamComparison {
    pub team1: TeamSide,
    pub team2: TeamSide,
    pub comparison: ComparisonMetrics,
}

// ---------------------------------------------------------------------------
// Squad composition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditDistribution {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Population standard deviation.
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAnalysis {
    pub avg_value_score: Option<f64>,
    pub top_value_players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadComposition {
    pub total_players: usize,
    pub credit_distribution: CreditDistribution,
    pub role_distribution: Vec<RoleCount>,
    pub credit_ranges: CreditBuckets,
    pub value_analysis: ValueAnalysis,
}

// ---------------------------------------------------------------------------
// Team strengths
// ---------------------------------------------------------------------------

/// Role-count and credit summary of one team. Only produced for teams with
/// at least one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStrengths {
    pub total_players: usize,
    /// BAT + ALL. All-rounders also count towards bowling.
    pub batting_strength: usize,
    /// BOWL + ALL.
    pub bowling_strength: usize,
    pub keeping_strength: usize,
    pub all_rounder_strength: usize,
    pub total_credits: f64,
    pub avg_player_credits: f64,
    pub value_strength: f64,
    pub role_value_strength: f64,
    pub batting_ratio: f64,
    pub bowling_ratio: f64,
    pub keeping_ratio: f64,
    pub all_rounder_ratio: f64,
}

// ---------------------------------------------------------------------------
// Match analysis
// ---------------------------------------------------------------------------

/// Basic per-team statistics used by the match view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    pub total_players: usize,
    pub average_credits: Option<f64>,
    pub max_credits: Option<f64>,
    pub role_distribution: Vec<RoleCount>,
    pub top_players: Vec<PlayerRecord>,
    pub value_players: Vec<PlayerRecord>,
    pub credit_distribution: CreditBuckets,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMatchData {
    pub name: String,
    pub stats: TeamStats,
    pub roles: RolePartition,
    pub strengths: TeamStrengths,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchAnalysis {
    pub team1: TeamMatchData,
    pub team2: TeamMatchData,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries() {
        assert_eq!(CreditBucket::of(0.0), CreditBucket::UpToFive);
        assert_eq!(CreditBucket::of(5.0), CreditBucket::UpToFive);
        assert_eq!(CreditBucket::of(5.01), CreditBucket::FiveToTen);
        assert_eq!(CreditBucket::of(10.0), CreditBucket::FiveToTen);
        assert_eq!(CreditBucket::of(10.5), CreditBucket::TenToFifteen);
        assert_eq!(CreditBucket::of(15.0), CreditBucket::TenToFifteen);
        assert_eq!(CreditBucket::of(15.5), CreditBucket::OverFifteen);
    }

    #[test]
    fn buckets_are_exhaustive() {
        let players: Vec<PlayerRecord> = (0..=80)
            .map(|i| PlayerRecord::new(format!("P{i}"), "T", Role::Bowler, i as f64 * 0.25))
            .collect();
        let buckets = CreditBuckets::from_players(&players);
        assert_eq!(buckets.total(), players.len());
        assert_eq!(buckets.up_to_five, 21);
        assert_eq!(buckets.five_to_ten, 20);
        assert_eq!(buckets.ten_to_fifteen, 20);
        assert_eq!(buckets.over_fifteen, 20);
    }

    #[test]
    fn bucket_entries_in_order() {
        let labels: Vec<_> = CreditBuckets::default()
            .entries()
            .iter()
            .map(|(l, _)| *l)
            .collect();
        assert_eq!(labels, vec!["0-5", "5-10", "10-15", "15+"]);
    }

    #[test]
    fn role_balance_score_sums_absolute_differences() {
        let metrics = ComparisonMetrics {
            credit_difference: 0.0,
            avg_credit_difference: None,
            role_balance: vec![
                RoleBalance { role: Role::Batsman, team1_count: 3, team2_count: 1, difference: 2 },
                RoleBalance { role: Role::Bowler, team1_count: 1, team2_count: 4, difference: -3 },
            ],
            value_comparison: ValueComparison {
                team1_value: None,
                team2_value: None,
                value_difference: None,
            },
        };
        assert_eq!(metrics.role_balance_score(), 5);
    }

    #[test]
    fn empty_partition() {
        let partition = RolePartition::default();
        assert!(partition.is_empty());
        assert!(partition.labelled().iter().all(|(_, players)| players.is_empty()));
    }
}
