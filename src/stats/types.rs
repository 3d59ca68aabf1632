//! Report value types produced by the statistics engine.

use serde::Serialize;

use crate::records::Field;

/// Why a statistic has no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unavailable {
    /// The dataset schema lacks these columns
    MissingColumns(Vec<Field>),
    /// The columns exist but no record carries a usable value
    NoData,
}

/// A computed value, or the reason it could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat<T> {
    Value(T),
    Unavailable(Unavailable),
}

impl<T> Stat<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Stat::Value(v) => Some(v),
            Stat::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Stat::Value(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Stat<U> {
        match self {
            Stat::Value(v) => Stat::Value(f(v)),
            Stat::Unavailable(reason) => Stat::Unavailable(reason),
        }
    }
}

impl<T> From<Option<T>> for Stat<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Stat::Unavailable(Unavailable::NoData), Stat::Value)
    }
}

/// Number of records sharing one value of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub value: String,
    pub count: usize,
}

/// Mean trip duration of one group.
///
/// `trips` counts every record in the group; the mean only uses records
/// whose duration is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean<K> {
    pub key: K,
    pub trips: usize,
    pub mean_seconds: Stat<f64>,
}

/// Most popular start hour, month and weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeReport {
    pub most_common_hour: Stat<u32>,
    pub most_common_month: Stat<String>,
    pub most_common_day: Stat<String>,
}

/// Most popular start station, end station and start/end pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub most_common_start: Stat<String>,
    pub most_common_end: Stat<String>,
    pub most_common_trip: Stat<String>,
}

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationReport {
    pub total_seconds: Stat<f64>,
    pub mean_seconds: Stat<f64>,
    /// Records with a present duration
    pub counted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearSummary {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// User type and gender counts (groups in ascending value order) and birth year extremes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReport {
    pub user_types: Stat<Vec<GroupCount>>,
    pub genders: Stat<Vec<GroupCount>>,
    pub birth_years: Stat<BirthYearSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AgeMonth {
    pub age: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GenderMonth {
    pub gender: String,
    pub month: u32,
}
