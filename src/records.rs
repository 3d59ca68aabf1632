//! Trip records, the column schema and the merged dataset.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::catalog::{Source, Weekday};

/// A column that may or may not be populated by a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    StartTime,
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
    // derived
    Month,
    DayOfWeek,
    Age,
}

impl Field {
    /// Columns that can appear in raw source data.
    pub const RAW: [Field; 8] = [
        Field::StartTime,
        Field::EndTime,
        Field::TripDuration,
        Field::StartStation,
        Field::EndStation,
        Field::UserType,
        Field::Gender,
        Field::BirthYear,
    ];

    /// Header name used by the raw source files.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::StartTime => "Start Time",
            Field::EndTime => "End Time",
            Field::TripDuration => "Trip Duration",
            Field::StartStation => "Start Station",
            Field::EndStation => "End Station",
            Field::UserType => "User Type",
            Field::Gender => "Gender",
            Field::BirthYear => "Birth Year",
            Field::Month => "Month",
            Field::DayOfWeek => "Day of week",
            Field::Age => "Age",
        }
    }

    /// Looks up a raw column by its header name.
    pub fn from_column(name: &str) -> Option<Field> {
        Field::RAW.into_iter().find(|f| f.column_name() == name.trim())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// The set of fields actually populated across a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema(BTreeSet<Field>);

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    pub fn insert(&mut self, field: Field) {
        self.0.insert(field);
    }

    /// Adds every field of `other` to this schema.
    pub fn merge(&mut self, other: &Schema) {
        self.0.extend(other.0.iter().copied());
    }

    /// Returns the fields from `required` that are not in the schema.
    pub fn missing(&self, required: &[Field]) -> Vec<Field> {
        required
            .iter()
            .copied()
            .filter(|f| !self.contains(*f))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Field> for Schema {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One row of source data. Absent values are `None`, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub trip_duration_seconds: Option<f64>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived by the loader
    pub month: Option<u32>,
    pub day_of_week: Option<Weekday>,
    pub age: Option<i32>,
}

/// Records produced by one source together with the columns it populates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRecords {
    pub schema: Schema,
    pub records: Vec<TripRecord>,
}

/// Ordered, merged trip records plus the merged schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub sources: Vec<Source>,
    pub schema: Schema,
    pub records: Vec<TripRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has(&self, field: Field) -> bool {
        self.schema.contains(field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_column() {
        assert_eq!(Field::from_column("Start Time"), Some(Field::StartTime));
        assert_eq!(Field::from_column(" Birth Year "), Some(Field::BirthYear));
        assert_eq!(Field::from_column(""), None);
        // derived columns never come from raw headers
        assert_eq!(Field::from_column("Month"), None);
    }

    #[test]
    fn test_schema_merge_and_missing() {
        let mut a: Schema = [Field::StartTime, Field::Gender].into_iter().collect();
        let b: Schema = [Field::StartTime, Field::UserType].into_iter().collect();
        a.merge(&b);

        assert_eq!(a.len(), 3);
        assert!(a.contains(Field::UserType));
        assert_eq!(
            a.missing(&[Field::Gender, Field::BirthYear, Field::TripDuration]),
            vec![Field::BirthYear, Field::TripDuration]
        );
    }
}
