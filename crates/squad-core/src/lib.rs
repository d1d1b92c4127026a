// Library root: squad table loading and the analytics built on it.

pub mod analyzer;
pub mod config;
pub mod convert;
pub mod dataset;
pub mod player;
pub mod profile;
pub mod report;
pub mod stats;
pub mod suggestions;

pub use analyzer::{AnalysisError, SquadAnalyzer};
pub use dataset::{DataLoadError, Dataset};
pub use player::{PlayerRecord, Role};
