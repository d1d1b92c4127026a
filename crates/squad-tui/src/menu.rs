// Numbered text menu over the analyzer.
//
// Reads choices line by line from any `BufRead` and writes to any `Write`,
// so the whole flow can be driven from a byte buffer in tests. End of
// input at any prompt ends the session.

use std::io::{self, BufRead, Write};

use squad_core::SquadAnalyzer;
use tracing::{debug, info};

use crate::text;

const MENU_TITLE: &str = "Cricket Team Analysis CLI";
const FAREWELL: &str = "\nThank you for using Cricket Team Analysis CLI!";

const MENU_ENTRIES: [&str; 9] = [
    "Display Team Statistics",
    "Compare Two Teams",
    "Search Players",
    "Analyze Squad Composition",
    "Display Team Strengths",
    "Get Value Players",
    "Get Players by Credit Range",
    "Display Match Analysis",
    "Exit",
];

pub struct Menu<'a, R, W> {
    analyzer: &'a SquadAnalyzer,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(analyzer: &'a SquadAnalyzer, input: R, output: W) -> Self {
        Menu {
            analyzer,
            input,
            output,
        }
    }

    /// Run until the user picks Exit or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        info!("Menu session started");
        match self.main_loop() {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                writeln!(self.output, "{FAREWELL}")?;
                Ok(())
            }
            other => other,
        }
    }

    fn main_loop(&mut self) -> io::Result<()> {
        loop {
            self.display_menu()?;
            let line = self.prompt("\nEnter your choice (1-9): ")?;
            let choice: usize = match line.trim().parse() {
                Ok(n) => n,
                Err(_) => {
                    writeln!(self.output, "Please enter a valid number.")?;
                    continue;
                }
            };
            debug!("menu choice {}", choice);

            match choice {
                1 => self.team_statistics()?,
                2 => self.compare_teams()?,
                3 => self.search_players()?,
                4 => self.squad_composition()?,
                5 => self.team_strengths()?,
                6 => self.value_players()?,
                7 => self.credit_range()?,
                8 => self.match_analysis()?,
                9 => {
                    writeln!(self.output, "{FAREWELL}")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }

            self.prompt("\nPress Enter to continue...")?;
        }
    }

    fn display_menu(&mut self) -> io::Result<()> {
        write!(self.output, "{}", text::header(MENU_TITLE))?;
        for (i, entry) in MENU_ENTRIES.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, entry)?;
        }
        writeln!(self.output, "\n{}", "=".repeat(50))
    }

    // -- Prompts ------------------------------------------------------------

    /// Print `message` and read one line. End of input is reported as
    /// `UnexpectedEof`.
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// List teams and read a 1-based selection until it is valid. `None`
    /// when the table has no teams at all.
    fn select_team(&mut self) -> io::Result<Option<String>> {
        let teams = self.analyzer.get_total_teams();
        if teams.is_empty() {
            writeln!(self.output, "No teams available.")?;
            return Ok(None);
        }

        writeln!(self.output, "\nAvailable teams:")?;
        for (i, team) in teams.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, team)?;
        }

        loop {
            let line = self.prompt("\nSelect team number: ")?;
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=teams.len()).contains(&n) => return Ok(Some(teams[n - 1].clone())),
                Ok(_) => writeln!(self.output, "Invalid selection. Please try again.")?,
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn select_two_teams(&mut self) -> io::Result<Option<(String, String)>> {
        writeln!(self.output, "Select first team:")?;
        let Some(team1) = self.select_team()? else {
            return Ok(None);
        };
        writeln!(self.output, "\nSelect second team:")?;
        let Some(team2) = self.select_team()? else {
            return Ok(None);
        };
        Ok(Some((team1, team2)))
    }

    /// Read a credit window, re-prompting until both bounds parse and
    /// `min <= max`.
    fn read_credit_range(&mut self) -> io::Result<(f64, f64)> {
        loop {
            let min = self.prompt("Enter minimum credits: ")?;
            let max = self.prompt("Enter maximum credits: ")?;
            match (min.trim().parse::<f64>(), max.trim().parse::<f64>()) {
                (Ok(min), Ok(max)) if min <= max => return Ok((min, max)),
                (Ok(_), Ok(_)) => writeln!(
                    self.output,
                    "Minimum credits must be less than or equal to maximum credits."
                )?,
                _ => writeln!(self.output, "Please enter valid numbers.")?,
            }
        }
    }

    // -- Actions ------------------------------------------------------------

    fn team_statistics(&mut self) -> io::Result<()> {
        let Some(team) = self.select_team()? else {
            return Ok(());
        };
        let stats = self.analyzer.team_stats(&team);
        let roles = self.analyzer.get_players_by_role(&team);
        writeln!(self.output, "{}", text::team_statistics(&team, &stats, &roles))
    }

    fn compare_teams(&mut self) -> io::Result<()> {
        write!(self.output, "{}", text::header("Compare Teams"))?;
        let Some((team1, team2)) = self.select_two_teams()? else {
            return Ok(());
        };
        let cmp = self.analyzer.compare_teams(&team1, &team2);
        writeln!(self.output, "{}", text::team_comparison(&cmp))
    }

    fn search_players(&mut self) -> io::Result<()> {
        write!(self.output, "{}", text::header("Search Players"))?;
        let query = self.prompt("Enter search query: ")?;
        let results = self.analyzer.search_players(&query, None);
        if results.is_empty() {
            writeln!(self.output, "No players found matching your search.")
        } else {
            writeln!(self.output, "\nSearch Results:")?;
            writeln!(self.output, "{}", text::player_table(results, text::LISTING_COLUMNS))
        }
    }

    fn squad_composition(&mut self) -> io::Result<()> {
        let Some(team) = self.select_team()? else {
            return Ok(());
        };
        let comp = self.analyzer.analyze_squad_composition(&team);
        writeln!(self.output, "{}", text::squad_composition(&team, &comp))
    }

    fn team_strengths(&mut self) -> io::Result<()> {
        let Some(team) = self.select_team()? else {
            return Ok(());
        };
        match self.analyzer.get_team_strengths(&team) {
            Ok(strengths) => writeln!(self.output, "{}", text::team_strengths(&team, &strengths)),
            Err(e) => writeln!(self.output, "An error occurred: {e}"),
        }
    }

    fn value_players(&mut self) -> io::Result<()> {
        write!(self.output, "{}", text::header("Value Players"))?;
        let team = self.prompt("Enter team name (or press Enter for all teams): ")?;
        let team = team.trim();
        let min = self.prompt("Enter minimum credits (default: 0): ")?;
        let min_credits = match min.trim() {
            "" => 0.0,
            s => match s.parse::<f64>() {
                Ok(v) => v,
                Err(_) => return writeln!(self.output, "Please enter a valid number."),
            },
        };

        let team = (!team.is_empty()).then_some(team);
        let results = self.analyzer.get_value_players(team, min_credits);
        if results.is_empty() {
            writeln!(self.output, "No value players found matching your criteria.")
        } else {
            writeln!(self.output, "\nValue Players:")?;
            writeln!(self.output, "{}", text::player_table(results, text::RANKED_COLUMNS))
        }
    }

    fn credit_range(&mut self) -> io::Result<()> {
        write!(self.output, "{}", text::header("Players by Credit Range"))?;
        let (min, max) = self.read_credit_range()?;
        let results = self.analyzer.get_players_by_credit_range(min, max);
        if results.is_empty() {
            writeln!(self.output, "No players found in the specified credit range.")
        } else {
            writeln!(self.output, "\nPlayers in Credit Range:")?;
            writeln!(self.output, "{}", text::player_table(results, text::LISTING_COLUMNS))
        }
    }

    fn match_analysis(&mut self) -> io::Result<()> {
        write!(self.output, "{}", text::header("Match Analysis"))?;
        let Some((team1, team2)) = self.select_two_teams()? else {
            return Ok(());
        };
        match self.analyzer.today_match_data(&team1, &team2) {
            Ok(analysis) => writeln!(self.output, "{}", text::match_analysis(&analysis)),
            Err(e) => writeln!(self.output, "An error occurred: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
