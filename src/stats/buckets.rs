//! Mean trip duration grouped by (age, month) and (gender, month).
//!
//! The literal age bands are `<20`, `<30`, `(30,60)`, `(60,90)` and `>90`.
//! They overlap below 20, and ages 30, 60 and 90 fall in no band. The
//! disjoint mode instead partitions ages into `<20`, `[20,30)`, `[30,60)`,
//! `[60,90)` and `>=90`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{AgeMonth, GenderMonth, GroupMean, Stat};
use super::utility::{group_means, non_empty, with_columns};
use crate::error::Error;
use crate::records::{Dataset, Field};

/// How age bands treat their boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandMode {
    #[default]
    Literal,
    Disjoint,
}

impl FromStr for BandMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "literal" => Ok(BandMode::Literal),
            "disjoint" => Ok(BandMode::Disjoint),
            other => Err(Error::configuration(format!(
                "unknown age band mode '{other}' (expected 'literal' or 'disjoint')"
            ))),
        }
    }
}

impl fmt::Display for BandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandMode::Literal => f.write_str("literal"),
            BandMode::Disjoint => f.write_str("disjoint"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Under20,
    Under30,
    From30To60,
    From60To90,
    Over90,
}

impl AgeBand {
    pub const ALL: [AgeBand; 5] = [
        AgeBand::Under20,
        AgeBand::Under30,
        AgeBand::From30To60,
        AgeBand::From60To90,
        AgeBand::Over90,
    ];

    pub fn contains(self, age: i32, mode: BandMode) -> bool {
        match (mode, self) {
            (_, AgeBand::Under20) => age < 20,
            (BandMode::Literal, AgeBand::Under30) => age < 30,
            (BandMode::Literal, AgeBand::From30To60) => age > 30 && age < 60,
            (BandMode::Literal, AgeBand::From60To90) => age > 60 && age < 90,
            (BandMode::Literal, AgeBand::Over90) => age > 90,
            (BandMode::Disjoint, AgeBand::Under30) => (20..30).contains(&age),
            (BandMode::Disjoint, AgeBand::From30To60) => (30..60).contains(&age),
            (BandMode::Disjoint, AgeBand::From60To90) => (60..90).contains(&age),
            (BandMode::Disjoint, AgeBand::Over90) => age >= 90,
        }
    }

    pub fn label(self, mode: BandMode) -> &'static str {
        match (mode, self) {
            (_, AgeBand::Under20) => "<20",
            (BandMode::Literal, AgeBand::Under30) => "<30",
            (BandMode::Literal, AgeBand::From30To60) => "(30,60)",
            (BandMode::Literal, AgeBand::From60To90) => "(60,90)",
            (BandMode::Literal, AgeBand::Over90) => ">90",
            (BandMode::Disjoint, AgeBand::Under30) => "[20,30)",
            (BandMode::Disjoint, AgeBand::From30To60) => "[30,60)",
            (BandMode::Disjoint, AgeBand::From60To90) => "[60,90)",
            (BandMode::Disjoint, AgeBand::Over90) => ">=90",
        }
    }
}

/// Mean duration per month for the riders of one age band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSeries {
    pub band: AgeBand,
    pub label: &'static str,
    pub by_month: Vec<GroupMean<u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDurationReport {
    pub mode: BandMode,
    pub by_age_month: Stat<Vec<GroupMean<AgeMonth>>>,
    pub by_band: Stat<Vec<BandSeries>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderDurationReport {
    pub by_gender_month: Stat<Vec<GroupMean<GenderMonth>>>,
}

const AGE_COLUMNS: [Field; 3] = [Field::Age, Field::Month, Field::TripDuration];
const GENDER_COLUMNS: [Field; 3] = [Field::Gender, Field::Month, Field::TripDuration];

impl AgeDurationReport {
    pub fn from_dataset(dataset: &Dataset, mode: BandMode) -> Self {
        // (age, month, duration) for every record with both keys present
        let rows: Vec<(i32, u32, Option<f64>)> = dataset
            .iter()
            .filter_map(|r| Some((r.age?, r.month?, r.trip_duration_seconds)))
            .collect();

        let by_age_month = with_columns(dataset, &AGE_COLUMNS, || {
            non_empty(group_means(
                rows.iter()
                    .map(|&(age, month, duration)| (AgeMonth { age, month }, duration)),
            ))
        });

        let by_band = with_columns(dataset, &AGE_COLUMNS, || {
            if rows.is_empty() {
                return None;
            }
            let series = AgeBand::ALL
                .into_iter()
                .map(|band| BandSeries {
                    band,
                    label: band.label(mode),
                    by_month: group_means(
                        rows.iter()
                            .filter(|(age, _, _)| band.contains(*age, mode))
                            .map(|&(_, month, duration)| (month, duration)),
                    ),
                })
                .collect();
            Some(series)
        });

        Self {
            mode,
            by_age_month,
            by_band,
        }
    }
}

impl GenderDurationReport {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let by_gender_month = with_columns(dataset, &GENDER_COLUMNS, || {
            non_empty(group_means(dataset.iter().filter_map(|r| {
                let key = GenderMonth {
                    gender: r.gender.clone()?,
                    month: r.month?,
                };
                Some((key, r.trip_duration_seconds))
            })))
        });

        Self { by_gender_month }
    }

    /// `(month, mean seconds)` points for one gender, skipping months without a mean.
    pub fn series(&self, gender: &str) -> Vec<(u32, f64)> {
        let Stat::Value(groups) = &self.by_gender_month else {
            return Vec::new();
        };
        groups
            .iter()
            .filter(|g| g.key.gender == gender)
            .filter_map(|g| g.mean_seconds.value().map(|mean| (g.key.month, *mean)))
            .collect()
    }

    /// Distinct genders present, in ascending order.
    pub fn genders(&self) -> Vec<&str> {
        let Stat::Value(groups) = &self.by_gender_month else {
            return Vec::new();
        };
        let mut genders: Vec<&str> = groups.iter().map(|g| g.key.gender.as_str()).collect();
        genders.dedup();
        genders
    }
}
