// Configuration loading and parsing (squad.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::dataset::DEFAULT_DATA_PATH;
use crate::profile::RadarMaxima;
use crate::suggestions::SuggestionQuotas;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// squad.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub suggestions: SuggestionQuotas,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            path: DEFAULT_DATA_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub tick_rate_ms: u64,
    #[serde(default)]
    pub radar: RadarMaxima,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            tick_rate_ms: 250,
            radar: RadarMaxima::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "squad.toml";

/// Load and validate `config/squad.toml` relative to `base_dir`.
///
/// Does not create the file; see `load_config_in`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Create `config/squad.toml` from `defaults/squad.toml` when it is missing.
///
/// The default file is parsed and validated first, so a broken default
/// never lands in `config/`. Returns the written path, or `None` when the
/// config file already existed.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let default_path = base_dir.join("defaults").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&default_path).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "no {} and no usable {} ({e})",
            target.display(),
            default_path.display()
        ),
    })?;
    validate(&parse_config(&text, &default_path)?)?;

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }
    std::fs::write(&target, text).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;
    info!("Created {} from defaults", target.display());
    Ok(Some(target))
}

/// Load config under `base_dir`, creating it from defaults on first run.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_file(base_dir)?;
    load_config_from(base_dir)
}

/// `load_config_in` for the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_in(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.dashboard.tick_rate_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "dashboard.tick_rate_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    let r = &config.dashboard.radar;
    let radar_fields: &[(&str, f64)] = &[
        ("dashboard.radar.batting", r.batting),
        ("dashboard.radar.bowling", r.bowling),
        ("dashboard.radar.keeping", r.keeping),
        ("dashboard.radar.all_rounders", r.all_rounders),
        ("dashboard.radar.credit_value", r.credit_value),
    ];
    for (name, val) in radar_fields {
        if !(*val > 0.0) {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be > 0, got {val}"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
