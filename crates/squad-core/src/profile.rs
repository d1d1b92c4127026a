// Normalised team strength profile (the dashboard's radar axes).
//
// Each axis is a raw team figure divided by a configured maximum, so a
// full-strength team sits near 1.0 on every axis.

use serde::{Deserialize, Serialize};

use crate::analyzer::SquadAnalyzer;
use crate::player::Role;
use crate::stats::{self, NumericField};

/// Divisors for each profile axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RadarMaxima {
    pub batting: f64,
    pub bowling: f64,
    pub keeping: f64,
    pub all_rounders: f64,
    pub credit_value: f64,
}

impl Default for RadarMaxima {
    fn default() -> Self {
        RadarMaxima {
            batting: 20.0,
            bowling: 20.0,
            keeping: 5.0,
            all_rounders: 10.0,
            credit_value: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthProfile {
    pub batting: f64,
    pub bowling: f64,
    pub keeping: f64,
    pub all_rounders: f64,
    /// Mean credits over the maximum; undefined for an empty team.
    pub credit_value: Option<f64>,
}

impl StrengthProfile {
    /// `(axis label, value)` pairs in display order. Undefined axes read 0.
    pub fn axes(&self) -> [(&'static str, f64); 5] {
        [
            ("Batting", self.batting),
            ("Bowling", self.bowling),
            ("Keeping", self.keeping),
            ("All-Rounders", self.all_rounders),
            ("Credit Value", self.credit_value.unwrap_or(0.0)),
        ]
    }
}

impl SquadAnalyzer {
    pub fn strength_profile(&self, team: &str, maxima: &RadarMaxima) -> StrengthProfile {
        let players = self.get_team_players(team);
        let count = |pred: fn(&Role) -> bool| players.iter().filter(|p| pred(&p.role)).count() as f64;

        StrengthProfile {
            batting: count(Role::bats) / maxima.batting,
            bowling: count(Role::bowls) / maxima.bowling,
            keeping: count(|r| *r == Role::WicketKeeper) / maxima.keeping,
            all_rounders: count(|r| *r == Role::AllRounder) / maxima.all_rounders,
            credit_value: stats::mean(players.iter().copied(), NumericField::Credits)
                .map(|m| m / maxima.credit_value),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
