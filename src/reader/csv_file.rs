use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::client::SourceReader;
use crate::catalog::Source;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::parse_trips;
use crate::records::SourceRecords;

/// Reads each source from a CSV file under a data directory.
#[derive(Debug, Clone)]
pub struct CsvSourceReader {
    data_dir: PathBuf,
    overrides: HashMap<Source, PathBuf>,
}

impl CsvSourceReader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Uses the data directory and locator overrides from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut reader = Self::new(&config.data_dir);
        for (name, path) in &config.locators {
            let source = Source::from_name(name)
                .ok_or_else(|| Error::configuration(format!("unknown source '{name}' in locators")))?;
            reader.overrides.insert(source, path.clone());
        }
        Ok(reader)
    }

    /// Replaces the file used for `source`.
    pub fn with_locator(mut self, source: Source, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(source, path.into());
        self
    }

    /// Resolves the file backing `source`. Relative overrides are resolved against the data directory.
    pub fn path_for(&self, source: Source) -> PathBuf {
        match self.overrides.get(&source) {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.data_dir.join(path),
            None => self.data_dir.join(source.locator()),
        }
    }
}

impl SourceReader for CsvSourceReader {
    fn read(&self, source: Source) -> Result<SourceRecords> {
        let path = self.path_for(source);
        let file = File::open(&path).map_err(|e| {
            Error::data_source(source.name(), format!("cannot open {}", display(&path)), e)
        })?;
        parse_trips(BufReader::new(file), source)
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
