//! Descriptive statistics over a filtered [`Dataset`].
//!
//! Every statistic first checks that its columns are in the dataset schema
//! and reports [`Stat::Unavailable`] instead of failing, so one missing column
//! never affects an unrelated statistic. Modes break ties toward the smallest
//! value (numeric for hours and years, alphabetical for names).

pub mod buckets;
pub mod duration;
pub mod stations;
pub mod time;
pub mod types;
pub mod users;
pub mod utility;

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::records::Dataset;
pub use buckets::{AgeBand, AgeDurationReport, BandMode, BandSeries, GenderDurationReport};
pub use types::{
    AgeMonth, BirthYearSummary, DurationReport, GenderMonth, GroupCount, GroupMean, Stat,
    StationReport, TimeReport, Unavailable, UserReport,
};

/// A statistic family, computed and presented as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Time,
    Stations,
    Duration,
    Users,
    AgeDuration,
    GenderDuration,
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::Time,
        Family::Stations,
        Family::Duration,
        Family::Users,
        Family::AgeDuration,
        Family::GenderDuration,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Family::Time => "The Most Frequent Times of Travel",
            Family::Stations => "The Most Popular Stations and Trip",
            Family::Duration => "Trip Duration",
            Family::Users => "User Stats",
            Family::AgeDuration => "Avg. Trip Duration by Month and Age",
            Family::GenderDuration => "Avg. Trip Duration by Month and Gender",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The report of a single family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum FamilyReport {
    Time(TimeReport),
    Stations(StationReport),
    Duration(DurationReport),
    Users(UserReport),
    AgeDuration(AgeDurationReport),
    GenderDuration(GenderDurationReport),
}

/// Computes one family. Reads the dataset only.
pub fn compute(dataset: &Dataset, family: Family, bands: BandMode) -> FamilyReport {
    let started = Instant::now();
    let report = match family {
        Family::Time => FamilyReport::Time(TimeReport::from_dataset(dataset)),
        Family::Stations => FamilyReport::Stations(StationReport::from_dataset(dataset)),
        Family::Duration => FamilyReport::Duration(DurationReport::from_dataset(dataset)),
        Family::Users => FamilyReport::Users(UserReport::from_dataset(dataset)),
        Family::AgeDuration => {
            FamilyReport::AgeDuration(AgeDurationReport::from_dataset(dataset, bands))
        }
        Family::GenderDuration => {
            FamilyReport::GenderDuration(GenderDurationReport::from_dataset(dataset))
        }
    };
    debug!(
        family = ?family,
        records = dataset.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Statistic computed"
    );
    report
}

/// Every family for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub records: usize,
    pub time: TimeReport,
    pub stations: StationReport,
    pub duration: DurationReport,
    pub users: UserReport,
    pub age_duration: AgeDurationReport,
    pub gender_duration: GenderDurationReport,
}

impl StatsReport {
    pub fn from_dataset(dataset: &Dataset, bands: BandMode) -> Self {
        Self {
            records: dataset.len(),
            time: TimeReport::from_dataset(dataset),
            stations: StationReport::from_dataset(dataset),
            duration: DurationReport::from_dataset(dataset),
            users: UserReport::from_dataset(dataset),
            age_duration: AgeDurationReport::from_dataset(dataset, bands),
            gender_duration: GenderDurationReport::from_dataset(dataset),
        }
    }

    /// The stored report of `family`.
    pub fn family(&self, family: Family) -> FamilyReport {
        match family {
            Family::Time => FamilyReport::Time(self.time.clone()),
            Family::Stations => FamilyReport::Stations(self.stations.clone()),
            Family::Duration => FamilyReport::Duration(self.duration.clone()),
            Family::Users => FamilyReport::Users(self.users.clone()),
            Family::AgeDuration => FamilyReport::AgeDuration(self.age_duration.clone()),
            Family::GenderDuration => FamilyReport::GenderDuration(self.gender_duration.clone()),
        }
    }
}
