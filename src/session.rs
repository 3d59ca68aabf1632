//! One analysis session: a validated filter and the dataset loaded for it.
//!
//! Restarting with new filters means building a new [`Session`]; nothing is
//! kept between sessions.

use tracing::info;

use crate::error::Result;
use crate::filter::FilterSpec;
use crate::loader;
use crate::reader::SourceReader;
use crate::records::Dataset;
use crate::stats::{self, BandMode, Family, FamilyReport, StatsReport};

#[derive(Debug, Clone)]
pub struct Session {
    spec: FilterSpec,
    dataset: Dataset,
    bands: BandMode,
}

impl Session {
    /// Loads the filtered dataset for `spec`.
    #[tracing::instrument(skip_all, fields(sources = spec.sources.len(), months = spec.months.len(), weekdays = spec.weekdays.len()))]
    pub fn start<R: SourceReader + ?Sized>(spec: FilterSpec, reader: &R) -> Result<Self> {
        let dataset = loader::load(&spec, reader)?;
        info!(records = dataset.len(), "Session started");
        Ok(Self::from_parts(spec, dataset))
    }

    /// Wraps an already loaded dataset.
    pub fn from_parts(spec: FilterSpec, dataset: Dataset) -> Self {
        Self {
            spec,
            dataset,
            bands: BandMode::default(),
        }
    }

    pub fn with_band_mode(mut self, bands: BandMode) -> Self {
        self.bands = bands;
        self
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn band_mode(&self) -> BandMode {
        self.bands
    }

    pub fn compute(&self, family: Family) -> FamilyReport {
        stats::compute(&self.dataset, family, self.bands)
    }

    pub fn report(&self) -> StatsReport {
        StatsReport::from_dataset(&self.dataset, self.bands)
    }
}
