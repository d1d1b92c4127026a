// Fantasy XI suggestions and result-set filtering.
//
// Suggestions pick the cheapest players per role up to a quota. The filter
// narrows any result set by role and an inclusive credit window.

use serde::{Deserialize, Serialize};

use crate::analyzer::SquadAnalyzer;
use crate::player::{PlayerRecord, Role};
use crate::stats::{self, NumericField};

/// How many players of each role a suggested side contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SuggestionQuotas {
    pub wicket_keepers: usize,
    pub batsmen: usize,
    pub bowlers: usize,
    pub all_rounders: usize,
}

impl Default for SuggestionQuotas {
    fn default() -> Self {
        SuggestionQuotas {
            wicket_keepers: 2,
            batsmen: 4,
            bowlers: 4,
            all_rounders: 2,
        }
    }
}

impl SuggestionQuotas {
    pub fn for_role(&self, role: &Role) -> usize {
        match role {
            Role::WicketKeeper => self.wicket_keepers,
            Role::Batsman => self.batsmen,
            Role::Bowler => self.bowlers,
            Role::AllRounder => self.all_rounders,
            Role::Other(_) => 0,
        }
    }
}

/// One role group of a suggested side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionGroup {
    pub label: &'static str,
    pub role: Role,
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FantasySuggestions {
    pub groups: Vec<SuggestionGroup>,
    pub total_credits: f64,
}

impl FantasySuggestions {
    pub fn player_count(&self) -> usize {
        self.groups.iter().map(|g| g.players.len()).sum()
    }
}

impl SquadAnalyzer {
    /// Cheapest players per role (highest value score), optionally from one
    /// team only. A role with fewer candidates than its quota contributes
    /// what it has.
    pub fn fantasy_suggestions(
        &self,
        team: Option<&str>,
        quotas: &SuggestionQuotas,
    ) -> FantasySuggestions {
        let groups: Vec<SuggestionGroup> = [
            ("Wicket Keepers", Role::WicketKeeper),
            ("Batsmen", Role::Batsman),
            ("Bowlers", Role::Bowler),
            ("All-Rounders", Role::AllRounder),
        ]
        .into_iter()
        .map(|(label, role)| {
            let pool = self
                .players()
                .iter()
                .filter(|p| p.role == role)
                .filter(|p| team.map_or(true, |t| p.team == t));
            let picked = stats::top_n(pool, quotas.for_role(&role), NumericField::ValueScore);
            SuggestionGroup {
                label,
                role,
                players: picked.into_iter().cloned().collect(),
            }
        })
        .collect();

        let total_credits: f64 = groups
            .iter()
            .map(|g| stats::sum(&g.players, NumericField::Credits))
            .sum();

        FantasySuggestions {
            groups,
            total_credits,
        }
    }
}

/// Narrow a result set. An empty `roles` slice means "any role"; the credit
/// window is inclusive on both ends.
pub fn filter_players<'a>(
    players: &[&'a PlayerRecord],
    roles: &[Role],
    min_credits: f64,
    max_credits: f64,
) -> Vec<&'a PlayerRecord> {
    players
        .iter()
        .copied()
        .filter(|p| roles.is_empty() || roles.contains(&p.role))
        .filter(|p| p.credits >= min_credits && p.credits <= max_credits)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
