// Squad analyzer entry point.
//
// Startup sequence:
// 1. Initialize tracing (appends to logs/squad.log under the config directory)
// 2. Load config (created from defaults/squad.toml on first run)
// 3. Load the squad table
// 4. Dispatch to the menu, the dashboard, a JSON report, or the converter

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use squad_core::config::{self, Config};
use squad_core::convert;
use squad_core::SquadAnalyzer;
use squad_tui::dashboard::{self, ViewState};
use squad_tui::export::{self, ReportKind};
use squad_tui::menu::Menu;

#[derive(Debug, Parser)]
#[command(name = "squad", version, about = "Fantasy cricket squad analyzer")]
struct Cli {
    /// Squad CSV to load instead of the configured one.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Directory holding config/squad.toml (default: working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Numbered text menu (default).
    Menu,
    /// Full-screen dashboard.
    Dashboard,
    /// Print one report as JSON.
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },
    /// Normalise a spreadsheet export into the squad CSV layout.
    Convert {
        input: PathBuf,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = init_tracing(&base_dir(cli.config.as_deref()))?;
    info!("Squad analyzer starting up, logging to {}", log_path.display());

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let (analyzer, _) = load_squad(cli.config.as_deref(), cli.data.as_deref())?;
            let stdin = io::stdin();
            let mut menu = Menu::new(&analyzer, stdin.lock(), io::stdout());
            menu.run().context("menu I/O failed")?;
        }
        Commands::Dashboard => {
            let (analyzer, config) = load_squad(cli.config.as_deref(), cli.data.as_deref())?;
            let tick = Duration::from_millis(config.dashboard.tick_rate_ms);
            dashboard::run(ViewState::new(analyzer, &config), tick).await?;
        }
        Commands::Report { kind } => {
            let (analyzer, config) = load_squad(cli.config.as_deref(), cli.data.as_deref())?;
            let json = export::render_report(&analyzer, &kind, &config)?;
            println!("{json}");
        }
        // Works on raw exports and needs neither config nor data.
        Commands::Convert { input, out_dir } => {
            let written = convert::convert_export(&input, out_dir.as_deref())
                .with_context(|| format!("failed to convert {}", input.display()))?;
            println!("Converted file saved as: {}", written.display());
        }
    }

    info!("Squad analyzer shut down cleanly");
    Ok(())
}

/// Load config, then the squad table it points at (or `data_override`).
fn load_squad(
    config_dir: Option<&Path>,
    data_override: Option<&Path>,
) -> anyhow::Result<(SquadAnalyzer, Config)> {
    let (config, base_dir) = load_config(config_dir)?;
    let data_path = match data_override {
        Some(path) => path.to_path_buf(),
        None => base_dir.join(&config.data.path),
    };
    let analyzer = SquadAnalyzer::from_path(&data_path)
        .with_context(|| format!("failed to load squad data from {}", data_path.display()))?;
    info!(
        "Loaded {} players across {} teams from {}",
        analyzer.players().len(),
        analyzer.get_total_teams().len(),
        data_path.display()
    );
    Ok((analyzer, config))
}

/// Load config from `dir` (or the working directory) and return it with the
/// directory relative data paths resolve against.
fn load_config(dir: Option<&Path>) -> anyhow::Result<(Config, PathBuf)> {
    let base_dir = base_dir(dir);
    let config = config::load_config_in(&base_dir).with_context(|| {
        format!("failed to load configuration under {}", base_dir.display())
    })?;
    Ok((config, base_dir))
}

fn base_dir(dir: Option<&Path>) -> PathBuf {
    dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

const LOG_FILE: &str = "squad.log";
const DEFAULT_LOG_FILTER: &str = "squad=info,squad_core=info,squad_tui=info,warn";

/// Append tracing output to `<base_dir>/logs/squad.log`. The terminal
/// belongs to the menu and the dashboard.
fn init_tracing(base_dir: &Path) -> anyhow::Result<PathBuf> {
    let log_path = base_dir.join("logs").join(LOG_FILE);
    let log_file = open_log(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))?;
    Ok(log_path)
}

fn open_log(path: &Path) -> io::Result<std::fs::File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
