// Non-interactive JSON output of any analyzer report.

use clap::Subcommand;
use serde::Serialize;
use thiserror::Error;

use squad_core::config::Config;
use squad_core::{AnalysisError, SquadAnalyzer};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which report to print.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ReportKind {
    /// Distinct team names in table order.
    Teams,
    /// Every player of one team.
    TeamPlayers { team: String },
    /// A team split into the four role buckets.
    Roles { team: String },
    /// Case-insensitive name search.
    Search {
        query: String,
        #[arg(long)]
        team: Option<String>,
    },
    /// Players within an inclusive credit window.
    CreditRange { min: f64, max: f64 },
    /// Cheapest players weighted by role.
    Value {
        #[arg(long)]
        team: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        min_credits: f64,
    },
    /// Side-by-side comparison of two teams.
    Compare { team1: String, team2: String },
    /// Credit and role make-up of one team.
    Composition { team: String },
    /// Role counts, credit aggregates and ratios.
    Strengths { team: String },
    /// Basic statistics block.
    Stats { team: String },
    /// Stats, roles and strengths for both sides of a fixture.
    Match { team1: String, team2: String },
    /// Suggested fantasy side using the configured quotas.
    Suggestions {
        #[arg(long)]
        team: Option<String>,
    },
    /// Normalised strength profile using the configured maxima.
    Profile { team: String },
}

/// Build the requested report and encode it as pretty-printed JSON.
pub fn render_report(
    analyzer: &SquadAnalyzer,
    kind: &ReportKind,
    config: &Config,
) -> Result<String, ExportError> {
    fn json<T: Serialize>(value: &T) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    match kind {
        ReportKind::Teams => json(&analyzer.get_total_teams()),
        ReportKind::TeamPlayers { team } => json(&analyzer.get_team_players(team)),
        ReportKind::Roles { team } => json(&analyzer.get_players_by_role(team)),
        ReportKind::Search { query, team } => {
            json(&analyzer.search_players(query, team.as_deref()))
        }
        ReportKind::CreditRange { min, max } => {
            json(&analyzer.get_players_by_credit_range(*min, *max))
        }
        ReportKind::Value { team, min_credits } => {
            json(&analyzer.get_value_players(team.as_deref(), *min_credits))
        }
        ReportKind::Compare { team1, team2 } => json(&analyzer.compare_teams(team1, team2)),
        ReportKind::Composition { team } => json(&analyzer.analyze_squad_composition(team)),
        ReportKind::Strengths { team } => json(&analyzer.get_team_strengths(team)?),
        ReportKind::Stats { team } => json(&analyzer.team_stats(team)),
        ReportKind::Match { team1, team2 } => json(&analyzer.today_match_data(team1, team2)?),
        ReportKind::Suggestions { team } => {
            json(&analyzer.fantasy_suggestions(team.as_deref(), &config.suggestions))
        }
        ReportKind::Profile { team } => {
            json(&analyzer.strength_profile(team, &config.dashboard.radar))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
