// Terminal dashboard: five analysis pages over one loaded squad table.
//
// The dashboard owns a `ViewState` holding the analyzer plus every
// selection the user has made (page, teams, filters). Widgets read it to
// draw; `input::handle_key` is the only thing that mutates it.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tracing::{info, warn};

use squad_core::config::Config;
use squad_core::player::{PlayerRecord, Role};
use squad_core::profile::RadarMaxima;
use squad_core::suggestions::{self, SuggestionQuotas};
use squad_core::SquadAnalyzer;

use layout::build_layout;

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Comparison,
    Search,
    Value,
    Suggestions,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Overview,
        Page::Comparison,
        Page::Search,
        Page::Value,
        Page::Suggestions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Team Overview",
            Page::Comparison => "Team Comparison",
            Page::Search => "Player Search",
            Page::Value => "Value Analysis",
            Page::Suggestions => "Fantasy Suggestions",
        }
    }

    /// Short label for the page tabs.
    pub fn tab_label(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Comparison => "Compare",
            Page::Search => "Search",
            Page::Value => "Value",
            Page::Suggestions => "Fantasy",
        }
    }

    /// Whether the page's team selector includes an "All" entry.
    pub fn has_all_scope(self) -> bool {
        matches!(self, Page::Search | Page::Value | Page::Suggestions)
    }
}

/// Commands the input handler hands back to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Upper bound of the minimum-credits filter.
pub const MAX_MIN_CREDITS: f64 = 20.0;
/// Step applied by `+` and `-`.
pub const CREDIT_STEP: f64 = 0.5;

pub struct ViewState {
    pub analyzer: SquadAnalyzer,
    /// Team names in table order, cached at startup.
    pub teams: Vec<String>,
    pub page: Page,
    /// Index into `teams` for the overview page.
    pub overview_team: usize,
    /// Team scope of the search, value and suggestion pages. 0 is "All",
    /// `i` is `teams[i - 1]`.
    pub scope: usize,
    /// Indices into `teams` for the two comparison sides.
    pub compare: [usize; 2],
    /// Which comparison side Left/Right moves (0 or 1).
    pub compare_side: usize,
    pub search_text: String,
    pub search_mode: bool,
    pub role_filter: Option<Role>,
    pub min_credits: f64,
    pub quotas: SuggestionQuotas,
    pub radar: RadarMaxima,
    pub last_updated: DateTime<Local>,
}

impl ViewState {
    pub fn new(analyzer: SquadAnalyzer, config: &Config) -> Self {
        let teams = analyzer.get_total_teams();
        let second = if teams.len() > 1 { 1 } else { 0 };
        ViewState {
            analyzer,
            teams,
            page: Page::Overview,
            overview_team: 0,
            scope: 0,
            compare: [0, second],
            compare_side: 0,
            search_text: String::new(),
            search_mode: false,
            role_filter: None,
            min_credits: 0.0,
            quotas: config.suggestions,
            radar: config.dashboard.radar,
            last_updated: Local::now(),
        }
    }

    pub fn overview_team(&self) -> Option<&str> {
        self.teams.get(self.overview_team).map(String::as_str)
    }

    /// `None` means all teams.
    pub fn scope_team(&self) -> Option<&str> {
        match self.scope {
            0 => None,
            i => self.teams.get(i - 1).map(String::as_str),
        }
    }

    pub fn scope_label(&self) -> &str {
        self.scope_team().unwrap_or("All")
    }

    pub fn compare_teams(&self) -> Option<(&str, &str)> {
        let a = self.teams.get(self.compare[0])?;
        let b = self.teams.get(self.compare[1])?;
        Some((a, b))
    }

    /// Apply the role and minimum-credit filters to a result set.
    pub fn apply_filters<'a>(&self, players: &[&'a PlayerRecord]) -> Vec<&'a PlayerRecord> {
        suggestions::filter_players(
            players,
            self.role_filter.as_slice(),
            self.min_credits,
            f64::INFINITY,
        )
    }

    /// Human-readable summary of the active filters, empty when none.
    pub fn filter_summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(role) = &self.role_filter {
            parts.push(format!("role {role}"));
        }
        if self.min_credits > 0.0 {
            parts.push(format!("credits >= {:.1}", self.min_credits));
        }
        parts.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.page {
        Page::Overview => widgets::overview::render(frame, layout.body, state),
        Page::Comparison => widgets::comparison::render(frame, layout.body, state),
        Page::Search => widgets::search::render(frame, layout.body, state),
        Page::Value => widgets::value::render(frame, layout.body, state),
        Page::Suggestions => widgets::suggestions::render(frame, layout.body, state),
    }
    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the dashboard until the user quits.
///
/// Takes over the terminal (raw mode, alternate screen), restores it on
/// exit and from a panic hook.
pub async fn run(mut view_state: ViewState, tick_rate: Duration) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(tick_rate);
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!("Dashboard started with {} teams", view_state.teams.len());

    let result = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(UserCommand::Quit) = input::handle_key(key_event, &mut view_state) {
                            break Ok(());
                        }
                        if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                            break Err(e.into());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    info!("Dashboard closed");
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn new_state_selects_first_two_teams() {
        let state = fixture_state();
        assert_eq!(state.teams, vec!["MI", "CSK", "RCB"]);
        assert_eq!(state.page, Page::Overview);
        assert_eq!(state.overview_team(), Some("MI"));
        assert_eq!(state.compare_teams(), Some(("MI", "CSK")));
        assert_eq!(state.scope_team(), None);
        assert_eq!(state.scope_label(), "All");
        assert!(state.filter_summary().is_empty());
    }

    #[test]
    fn empty_table_has_no_selection() {
        let state = empty_state();
        assert_eq!(state.overview_team(), None);
        assert_eq!(state.compare_teams(), None);
    }

    #[test]
    fn single_team_compares_with_itself() {
        let mut state = empty_state();
        state.teams = vec!["Solo".into()];
        state.compare = [0, 0];
        assert_eq!(state.compare_teams(), Some(("Solo", "Solo")));
    }

    #[test]
    fn filters_narrow_results() {
        let mut state = fixture_state();
        let mi = state.analyzer.get_team_players("MI");
        assert_eq!(state.apply_filters(&mi).len(), 4);

        state.role_filter = Some(Role::Bowler);
        assert_eq!(state.apply_filters(&mi).len(), 1);

        state.role_filter = None;
        state.min_credits = 9.0;
        let names: Vec<_> = state.apply_filters(&mi).iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Rohit Sharma", "Ishan Kishan", "Hardik Pandya"]);
        assert_eq!(state.filter_summary(), "credits >= 9.0");
    }

    #[test]
    fn every_page_renders() {
        let mut state = fixture_state();
        for page in Page::ALL {
            state.page = page;
            let lines = rendered(120, 40, |frame| render_frame(frame, &state));
            assert!(contains(&lines, page.title()), "{:?} missing its title", page);
        }
    }

    #[test]
    fn every_page_renders_without_data() {
        let mut state = empty_state();
        for page in Page::ALL {
            state.page = page;
            rendered(80, 24, |frame| render_frame(frame, &state));
        }
    }
}
