use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::schema::ColumnSchema;
use crate::types::CurrencyUnit;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreSettings {
    /// Genres that get a group of their own.
    pub focus: Vec<String>,
    /// Group collecting every other genre.
    pub other: String,
}

impl Default for GenreSettings {
    fn default() -> Self {
        Self {
            focus: ["Action", "Adventure", "Drama"].map(String::from).to_vec(),
            other: "Other".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitSettings {
    /// Unit for production budgets and worldwide gross.
    pub display: CurrencyUnit,
    /// Unit for average profit per runtime bucket.
    pub profit_summary: CurrencyUnit,
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self {
            display: CurrencyUnit::HundredMillions,
            profit_summary: CurrencyUnit::Millions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub schema: ColumnSchema,
    /// Ordered `(low, high]` runtime ranges in minutes.
    pub runtime_buckets: Vec<(f64, f64)>,
    pub genres: GenreSettings,
    pub units: UnitSettings,
    pub chart: ChartSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("top-500-movies.csv"),
            output_dir: PathBuf::from("."),
            schema: ColumnSchema::default(),
            runtime_buckets: vec![
                (70.0, 90.0),
                (90.0, 100.0),
                (100.0, 110.0),
                (110.0, 120.0),
                (120.0, 130.0),
                (130.0, 140.0),
                (140.0, 150.0),
                (150.0, 220.0),
            ],
            genres: GenreSettings::default(),
            units: UnitSettings::default(),
            chart: ChartSettings::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        Ok(config)
    }
}
