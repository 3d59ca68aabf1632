//! Runtime configuration.
//!
//! Stored as a JSON object on disk, every key optional:
//! ```json
//! {
//!   "data_dir": "/srv/bikeshare",
//!   "locators": { "chicago": "chicago_2017.csv" },
//!   "age_bands": "disjoint"
//! }
//! ```
//! Environment variables (`BIKESHARE_DATA_DIR`, `BIKESHARE_AGE_BANDS`) are
//! read by [`Config::from_env`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stats::buckets::BandMode;

pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";
pub const AGE_BANDS_ENV: &str = "BIKESHARE_AGE_BANDS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the per-source files
    pub data_dir: PathBuf,
    /// Source name to file path, replacing the catalog locator
    pub locators: HashMap<String, PathBuf>,
    pub age_bands: BandMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            locators: HashMap::new(),
            age_bands: BandMode::Literal,
        }
    }
}

impl Config {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("cannot read config {}", path.display()), e))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::configuration(format!("{}: {}", path.display(), e)))
    }

    /// Builds the config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overrides fields from `lookup`, which maps variable names to values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(mode) = lookup(AGE_BANDS_ENV) {
            self.age_bands = mode.parse()?;
        }
        Ok(())
    }
}
