// Squad table loading.
//
// Reads the CSV produced by the spreadsheet export step. The four required
// columns are matched by exact (trimmed) header name; any other column is
// carried along per record as opaque text. A row whose credits do not parse
// as a non-negative number fails the whole load.

use crate::player::{PlayerRecord, Role};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the squad table lives when no path is configured.
pub const DEFAULT_DATA_PATH: &str = "data/squad_player_names.csv";

pub const COL_NAME: &str = "Player Name";
pub const COL_TEAM: &str = "Team";
pub const COL_ROLE: &str = "Player Type";
pub const COL_CREDITS: &str = "Credits";

const REQUIRED_COLUMNS: [&str; 4] = [COL_NAME, COL_TEAM, COL_ROLE, COL_CREDITS];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("squad data file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read squad data {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("squad data {path} is missing required column `{column}`")]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid row at {path}:{line}: {reason}")]
    InvalidRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    #[serde(rename = "Player Name", default)]
    name: String,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "Player Type", default)]
    role: String,
    #[serde(rename = "Credits")]
    credits: f64,
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The loaded squad table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PlayerRecord>,
    columns: Vec<String>,
}

impl Dataset {
    /// Build a dataset from already-parsed records, computing `team_value`.
    pub fn new(columns: Vec<String>, mut records: Vec<PlayerRecord>) -> Self {
        let mut totals: HashMap<String, (f64, usize)> = HashMap::new();
        for r in &records {
            let entry = totals.entry(r.team.clone()).or_insert((0.0, 0));
            entry.0 += r.value_score;
            entry.1 += 1;
        }
        for r in &mut records {
            if let Some(&(sum, n)) = totals.get(&r.team) {
                r.team_value = sum / n as f64;
            }
        }
        Dataset { records, columns }
    }

    /// Build from records using the standard header set.
    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        Self::new(columns, records)
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    /// Source column names in header order (derived columns excluded).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the squad table from a CSV file.
pub fn load_dataset(path: &Path) -> Result<Dataset, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DataLoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DataLoadError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let dataset = load_dataset_from_reader(file, path)?;
    info!(
        "Loaded {} players across {} columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok(dataset)
}

/// Load from any reader. `origin` is only used in error messages.
pub fn load_dataset_from_reader<R: Read>(rdr: R, origin: &Path) -> Result<Dataset, DataLoadError> {
    let csv_err = |e: csv::Error| DataLoadError::Csv {
        path: origin.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();

    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(DataLoadError::MissingColumn {
                path: origin.to_path_buf(),
                column: required.to_string(),
            });
        }
    }

    let extra_indices: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| !REQUIRED_COLUMNS.contains(&c.as_str()))
        .map(|(i, _)| i)
        .collect();

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = result.map_err(csv_err)?;
        // header is line 1
        let line = row
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 2);
        let invalid = |reason: String| DataLoadError::InvalidRow {
            path: origin.to_path_buf(),
            line,
            reason,
        };

        let raw: RawPlayerRow = row
            .deserialize(Some(&headers))
            .map_err(|e| invalid(e.to_string()))?;
        if !raw.credits.is_finite() || raw.credits < 0.0 {
            return Err(invalid(format!(
                "credits for '{}' must be a finite non-negative number, got {}",
                raw.name, raw.credits
            )));
        }

        let extra = extra_indices
            .iter()
            .map(|&i| (columns[i].clone(), row.get(i).unwrap_or_default().to_string()))
            .collect();

        let role = Role::from_code(&raw.role);
        if !role.is_known() {
            debug!("player '{}' has unrecognised role '{}'", raw.name, role.code());
        }
        records.push(PlayerRecord::new(raw.name, raw.team, role, raw.credits).with_extra(extra));
    }

    Ok(Dataset::new(columns, records))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
