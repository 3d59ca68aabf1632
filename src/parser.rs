//! CSV parser for per-source trip files.
//!
//! The header row decides the source's schema. Empty cells and the usual
//! missing-value spellings (`NA`, `NaN`, `null`, ...) become absent values,
//! and short rows leave their trailing fields absent.

use std::io::Read;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::Source;
use crate::error::{Error, Result};
use crate::records::{Field, Schema, SourceRecords, TripRecord};

/// A single row as it appears in the file, before typing.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time", default)]
    start_time: Option<String>,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration", default)]
    trip_duration: Option<String>,
    #[serde(rename = "Start Station", default)]
    start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    end_station: Option<String>,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

/// Cell contents read as a missing value, matched case-sensitively.
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp (a `T` separator is also accepted).
pub fn parse_timestamp(value: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
}

/// Decodes the trip records of `source` from CSV bytes.
///
/// # Errors
///
/// Returns [`Error::DataSource`] if the CSV is malformed or a timestamp or
/// number cannot be parsed.
pub fn parse_trips<R: Read>(reader: R, source: Source) -> Result<SourceRecords> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| Error::data_source(source.name(), "unreadable header row", e))?
        .clone();

    let mut schema = Schema::new();
    for name in headers.iter() {
        match Field::from_column(name) {
            Some(field) => schema.insert(field),
            None if name.is_empty() => {}
            None => warn!(source = %source, column = name, "Ignoring unknown column"),
        }
    }

    let mut records = Vec::new();
    for (line, row) in rdr.deserialize::<RawTrip>().enumerate() {
        let raw = row.map_err(|e| {
            Error::data_source(source.name(), format!("malformed row {}", line + 1), e)
        })?;
        records.push(into_record(raw, source, line + 1)?);
    }

    debug!(
        source = %source,
        columns = schema.len(),
        records = records.len(),
        "Parsed source file"
    );

    Ok(SourceRecords { schema, records })
}

fn into_record(raw: RawTrip, source: Source, line: usize) -> Result<TripRecord> {
    let timestamp = |value: Option<String>, column: Field| -> Result<_> {
        non_empty(value)
            .map(|v| {
                parse_timestamp(&v).map_err(|e| {
                    Error::data_source(
                        source.name(),
                        format!("bad {} '{}' in row {}", column, v, line),
                        e,
                    )
                })
            })
            .transpose()
    };

    let number = |value: Option<String>, column: Field| -> Result<Option<f64>> {
        let Some(v) = non_empty(value) else {
            return Ok(None);
        };
        let parsed: f64 = v.parse().map_err(|e| {
            Error::data_source(
                source.name(),
                format!("bad {} '{}' in row {}", column, v, line),
                e,
            )
        })?;
        Ok(Some(parsed).filter(|n| n.is_finite()))
    };

    Ok(TripRecord {
        start_time: timestamp(raw.start_time, Field::StartTime)?,
        end_time: timestamp(raw.end_time, Field::EndTime)?,
        start_station: non_empty(raw.start_station),
        end_station: non_empty(raw.end_station),
        trip_duration_seconds: number(raw.trip_duration, Field::TripDuration)?,
        user_type: non_empty(raw.user_type),
        gender: non_empty(raw.gender),
        birth_year: number(raw.birth_year, Field::BirthYear)?.map(|y| y.trunc() as i32),
        ..Default::default()
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !MISSING_MARKERS.contains(&v.as_str()))
}
