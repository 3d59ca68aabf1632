//! Merges the selected sources, derives calendar and age fields, and applies
//! the filter predicate.
//!
//! Records whose month or weekday cannot be derived (no start timestamp) are
//! never excluded by the month/weekday filter.

use chrono::{Datelike, Local};
use tracing::{debug, info};

use crate::error::Result;
use crate::filter::FilterSpec;
use crate::reader::{SourceReader, read_source};
use crate::records::{Dataset, Field, TripRecord};

/// Loads and filters the dataset for `spec`, computing ages against the current year.
pub fn load<R: SourceReader + ?Sized>(spec: &FilterSpec, reader: &R) -> Result<Dataset> {
    load_with_year(spec, reader, Local::now().year())
}

/// Same as [`load`] with an explicit evaluation year.
#[tracing::instrument(skip(spec, reader), fields(sources = spec.sources.len()))]
pub fn load_with_year<R: SourceReader + ?Sized>(
    spec: &FilterSpec,
    reader: &R,
    current_year: i32,
) -> Result<Dataset> {
    let mut dataset = Dataset::default();

    for &source in &spec.sources {
        let part = read_source(reader, source)?;
        dataset.schema.merge(&part.schema);
        dataset.records.extend(part.records);
        dataset.sources.push(source);
    }

    let merged = dataset.len();
    derive_fields(&mut dataset, current_year);

    dataset.records.retain(|r| passes_filter(r, spec));

    info!(
        merged,
        kept = dataset.len(),
        dropped = merged - dataset.len(),
        "Dataset loaded"
    );

    Ok(dataset)
}

/// Fills month, day of week and age wherever their source field is present,
/// and records the derived columns in the schema.
pub fn derive_fields(dataset: &mut Dataset, current_year: i32) {
    let has_start = dataset.has(Field::StartTime);
    let has_birth_year = dataset.has(Field::BirthYear);

    for record in &mut dataset.records {
        if has_start {
            if let Some(ts) = record.start_time {
                record.month = Some(ts.month());
                record.day_of_week = Some(ts.weekday().into());
            }
        }
        if has_birth_year {
            record.age = record.birth_year.map(|year| current_year - year);
        }
    }

    if has_start {
        dataset.schema.insert(Field::Month);
        dataset.schema.insert(Field::DayOfWeek);
    }
    if has_birth_year {
        dataset.schema.insert(Field::Age);
    }

    debug!(has_start, has_birth_year, "Derived fields");
}

/// Keeps a record unless a derived month or weekday falls outside the spec.
pub fn passes_filter(record: &TripRecord, spec: &FilterSpec) -> bool {
    let month_ok = record.month.is_none_or(|m| spec.includes_month(m));
    let day_ok = record.day_of_week.is_none_or(|d| spec.includes_weekday(d));
    month_ok && day_ok
}
