// Player record and role model.
//
// A `PlayerRecord` is one row of the squad table. The derived value columns
// are computed when the record is built and never change afterwards.

use serde::{Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Playing role of a cricketer, parsed from the `Player Type` column.
///
/// Codes outside the four known ones are preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
    Other(String),
}

/// The four recognised roles in display order (keeper first).
pub const KNOWN_ROLES: [Role; 4] = [
    Role::WicketKeeper,
    Role::Batsman,
    Role::Bowler,
    Role::AllRounder,
];

impl Role {
    /// Parse a role code. Matching is exact after trimming: `"bat"` is not
    /// `BAT` and ends up as `Other("bat")`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "BAT" => Role::Batsman,
            "BOWL" => Role::Bowler,
            "ALL" => Role::AllRounder,
            "WK" => Role::WicketKeeper,
            other => Role::Other(other.to_string()),
        }
    }

    /// The code as it appears in the source table.
    pub fn code(&self) -> &str {
        match self {
            Role::Batsman => "BAT",
            Role::Bowler => "BOWL",
            Role::AllRounder => "ALL",
            Role::WicketKeeper => "WK",
            Role::Other(code) => code,
        }
    }

    /// Bucket label used by the role partition. `None` for unrecognised codes.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Role::WicketKeeper => Some("Wicket Keeper"),
            Role::Batsman => Some("Batsman"),
            Role::Bowler => Some("Bowler"),
            Role::AllRounder => Some("All-rounder"),
            Role::Other(_) => None,
        }
    }

    /// Fantasy utility weighting applied to the value score.
    pub fn multiplier(&self) -> f64 {
        match self {
            Role::AllRounder => 1.5,
            Role::WicketKeeper => 1.3,
            Role::Batsman => 1.2,
            Role::Bowler => 1.0,
            Role::Other(_) => 1.0,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Other(_))
    }

    /// Counts towards batting strength (batsmen and all-rounders).
    pub fn bats(&self) -> bool {
        matches!(self, Role::Batsman | Role::AllRounder)
    }

    /// Counts towards bowling strength (bowlers and all-rounders).
    pub fn bowls(&self) -> bool {
        matches!(self, Role::Bowler | Role::AllRounder)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// PlayerRecord
// ---------------------------------------------------------------------------

/// One player row plus its derived value columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    /// Display name. An empty string stands for a missing cell.
    pub name: String,
    pub team: String,
    pub role: Role,
    pub credits: f64,
    /// `-credits`: the cheapest player has the largest value score.
    pub value_score: f64,
    /// `value_score * role.multiplier()`.
    pub role_value: f64,
    /// Mean value score of the player's team. Informational only.
    pub team_value: f64,
    /// Cells of non-required columns, in source column order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl PlayerRecord {
    /// Build a record and compute its per-row derived columns.
    ///
    /// `team_value` starts out as the player's own value score; the dataset
    /// overwrites it with the team mean once all rows are known.
    pub fn new(name: impl Into<String>, team: impl Into<String>, role: Role, credits: f64) -> Self {
        let value_score = -credits;
        let role_value = value_score * role.multiplier();
        PlayerRecord {
            name: name.into(),
            team: team.into(),
            role,
            credits,
            value_score,
            role_value,
            team_value: value_score,
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: Vec<(String, String)>) -> Self {
        self.extra = extra;
        self
    }

    /// Whether the name cell held a value.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_parse() {
        assert_eq!(Role::from_code("BAT"), Role::Batsman);
        assert_eq!(Role::from_code("BOWL"), Role::Bowler);
        assert_eq!(Role::from_code("ALL"), Role::AllRounder);
        assert_eq!(Role::from_code(" WK "), Role::WicketKeeper);
        assert_eq!(Role::from_code("bat"), Role::Other("bat".into()));
        assert_eq!(Role::from_code("CAPT").code(), "CAPT");
    }

    #[test]
    fn multipliers_follow_fixed_table() {
        assert!((Role::AllRounder.multiplier() - 1.5).abs() < f64::EPSILON);
        assert!((Role::Batsman.multiplier() - 1.2).abs() < f64::EPSILON);
        assert!((Role::WicketKeeper.multiplier() - 1.3).abs() < f64::EPSILON);
        assert!((Role::Bowler.multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((Role::Other("X".into()).multiplier() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn all_rounders_bat_and_bowl() {
        assert!(Role::AllRounder.bats());
        assert!(Role::AllRounder.bowls());
        assert!(Role::Batsman.bats() && !Role::Batsman.bowls());
        assert!(Role::Bowler.bowls() && !Role::Bowler.bats());
        assert!(!Role::WicketKeeper.bats() && !Role::WicketKeeper.bowls());
    }

    #[test]
    fn labels_only_for_known_roles() {
        let labels: Vec<_> = KNOWN_ROLES.iter().filter_map(|r| r.label()).collect();
        assert_eq!(labels, vec!["Wicket Keeper", "Batsman", "Bowler", "All-rounder"]);
        assert!(Role::Other("CAPT".into()).label().is_none());
    }

    #[test]
    fn derived_columns_computed_on_build() {
        let p = PlayerRecord::new("P1", "TeamA", Role::Batsman, 8.0);
        assert!((p.value_score + 8.0).abs() < 1e-9);
        assert!((p.role_value + 9.6).abs() < 1e-9);

        let unknown = PlayerRecord::new("P9", "TeamA", Role::from_code("CAPT"), 6.5);
        assert!((unknown.role_value + 6.5).abs() < 1e-9);
    }

    #[test]
    fn empty_name_counts_as_missing() {
        assert!(!PlayerRecord::new("", "TeamA", Role::Bowler, 5.0).has_name());
        assert!(PlayerRecord::new("X", "TeamA", Role::Bowler, 5.0).has_name());
    }
}
