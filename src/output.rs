//! Rendering and persistence of statistics reports.
//!
//! Supports console text, pretty-printing, JSON serialization, and CSV append
//! of the gender/month duration series used for charting.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::stats::{
    AgeDurationReport, DurationReport, FamilyReport, GenderDurationReport, GroupCount, Stat,
    StationReport, StatsReport, TimeReport, Unavailable, UserReport,
};
use csv::WriterBuilder;
use std::fmt::{Display, Write};
use std::fs::OpenOptions;
use std::path::Path;

const RULE: &str = "----------";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(report: &T) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    info!("{}", to_json(report)?);
    Ok(())
}

pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Formats seconds as `D days HH:MM:SS`, keeping fractional seconds to the microsecond.
pub fn format_duration(seconds: f64) -> String {
    let micros = (seconds * 1e6).round() as i64;
    let frac = micros % 1_000_000;
    let whole = micros / 1_000_000;
    let days = whole / 86_400;
    let hours = (whole % 86_400) / 3_600;
    let minutes = (whole % 3_600) / 60;
    let secs = whole % 60;

    let mut out = format!("{days} days {hours:02}:{minutes:02}:{secs:02}");
    if frac > 0 {
        let fraction = format!(".{frac:06}");
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

/// Renders every family of `report` as console text.
pub fn render(report: &StatsReport) -> String {
    let mut out = format!("Trips analysed: {}\n\n", report.records);
    for family in crate::stats::Family::ALL {
        out.push_str(&render_family(&report.family(family)));
        out.push('\n');
    }
    out
}

/// Renders one family as console text.
pub fn render_family(report: &FamilyReport) -> String {
    let mut out = String::new();
    match report {
        FamilyReport::Time(r) => render_time(&mut out, r),
        FamilyReport::Stations(r) => render_stations(&mut out, r),
        FamilyReport::Duration(r) => render_duration(&mut out, r),
        FamilyReport::Users(r) => render_users(&mut out, r),
        FamilyReport::AgeDuration(r) => render_age(&mut out, r),
        FamilyReport::GenderDuration(r) => render_gender(&mut out, r),
    }
    out
}

fn entry<T: Display>(out: &mut String, label: &str, stat: &Stat<T>, missing: &str) {
    match stat {
        Stat::Value(v) => {
            let _ = writeln!(out, "{label}:\n  {v}");
        }
        Stat::Unavailable(reason) => {
            let _ = writeln!(out, "{}", unavailable_text(missing, reason));
        }
    }
    let _ = writeln!(out, "{RULE}");
}

fn unavailable_text(missing: &str, reason: &Unavailable) -> String {
    match reason {
        Unavailable::MissingColumns(_) => format!("No {missing} data to share."),
        Unavailable::NoData => format!("No {missing} values in the filtered trips."),
    }
}

fn render_time(out: &mut String, r: &TimeReport) {
    let _ = writeln!(out, "| Calculating The Most Frequent Times of Travel... |\n");
    entry(out, "Most popular start hour", &r.most_common_hour, "start time");
    entry(out, "Most popular month", &r.most_common_month, "start time");
    entry(out, "Most popular day", &r.most_common_day, "day");
}

fn render_stations(out: &mut String, r: &StationReport) {
    let _ = writeln!(out, "| Calculating The Most Popular Stations and Trip... |\n");
    entry(out, "Most popular Start Station", &r.most_common_start, "start station");
    entry(out, "Most popular End Station", &r.most_common_end, "end station");
    entry(
        out,
        "Most popular Start - End Stations combo",
        &r.most_common_trip,
        "start station or end station",
    );
}

fn render_duration(out: &mut String, r: &DurationReport) {
    let _ = writeln!(out, "| Calculating Trip Duration... |\n");
    let total = r.total_seconds.clone().map(format_duration);
    let mean = r.mean_seconds.clone().map(format_duration);
    entry(out, "Total Trip Duration", &total, "trip duration");
    entry(out, "Average Trip Duration", &mean, "trip duration");
}

fn counts(groups: &[GroupCount]) -> String {
    groups
        .iter()
        .map(|g| format!("{}: {}", g.value, g.count))
        .collect::<Vec<_>>()
        .join("\n  ")
}

fn render_users(out: &mut String, r: &UserReport) {
    let _ = writeln!(out, "|  Calculating User Stats...  |\n");
    let types = r.user_types.clone().map(|g| counts(&g));
    let genders = r.genders.clone().map(|g| counts(&g));
    entry(out, "Counts of User Types", &types, "user type");
    entry(out, "Counts of Gender", &genders, "gender");

    let earliest = r.birth_years.clone().map(|b| b.earliest);
    let recent = r.birth_years.clone().map(|b| b.most_recent);
    let common = r.birth_years.clone().map(|b| b.most_common);
    entry(out, "Earliest year of birth among participants", &earliest, "birth year");
    entry(out, "Most recent year of birth among participants", &recent, "birth year");
    entry(out, "Most common year of birth among participants", &common, "birth year");
}

fn mean_text(stat: &Stat<f64>) -> String {
    match stat {
        Stat::Value(v) => format!("{v:.2}"),
        Stat::Unavailable(_) => "n/a".to_string(),
    }
}

fn render_age(out: &mut String, r: &AgeDurationReport) {
    let _ = writeln!(out, "| Avg. Trip Duration by Month and Age ({} bands) |\n", r.mode);
    let bands = r.by_band.clone().map(|bands| {
        let mut lines = Vec::new();
        for band in bands {
            let months = band
                .by_month
                .iter()
                .map(|g| format!("{}={}", g.key, mean_text(&g.mean_seconds)))
                .collect::<Vec<_>>();
            let months = if months.is_empty() {
                "(no trips)".to_string()
            } else {
                months.join(" ")
            };
            lines.push(format!("{:>8}  {}", band.label, months));
        }
        lines.join("\n  ")
    });
    entry(
        out,
        "Avg. Trip Duration (s) by age band, month=mean",
        &bands,
        "age or trip duration or month",
    );
}

fn render_gender(out: &mut String, r: &GenderDurationReport) {
    let _ = writeln!(out, "| Avg. Trip Duration by Month distributed by Gender |\n");
    let table = r.by_gender_month.clone().map(|groups| {
        groups
            .iter()
            .map(|g| {
                format!(
                    "{:<8} {:>2}  {}",
                    g.key.gender,
                    g.key.month,
                    mean_text(&g.mean_seconds)
                )
            })
            .collect::<Vec<_>>()
            .join("\n  ")
    });
    entry(
        out,
        "Avg. Trip Duration (s), gender month mean",
        &table,
        "gender or trip duration or month",
    );
}

/// Appends serializable rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = rows.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// One point of the gender/month duration series.
#[derive(Debug, Serialize)]
pub struct GenderSeriesRow<'a> {
    pub gender: &'a str,
    pub month: u32,
    pub trips: usize,
    pub mean_seconds: Option<f64>,
}

/// Appends the gender/month means of `report` to a CSV file, returning the row count.
pub fn export_gender_series(path: &str, report: &GenderDurationReport) -> Result<usize> {
    let Stat::Value(groups) = &report.by_gender_month else {
        info!(path, "No gender duration data to export");
        return Ok(0);
    };

    let rows: Vec<GenderSeriesRow<'_>> = groups
        .iter()
        .map(|g| GenderSeriesRow {
            gender: &g.key.gender,
            month: g.key.month,
            trips: g.trips,
            mean_seconds: g.mean_seconds.value().copied(),
        })
        .collect();

    append_records(path, &rows)?;
    info!(path, rows = rows.len(), "Exported gender duration series");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Dataset, Field, TripRecord};
    use crate::stats::{BandMode, Family, GenderMonth, GroupMean, compute};
    use std::fs;

    fn temp_path(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).display().to_string()
    }

    fn gender_report() -> GenderDurationReport {
        GenderDurationReport {
            by_gender_month: Stat::Value(vec![
                GroupMean {
                    key: GenderMonth { gender: "Female".into(), month: 1 },
                    trips: 2,
                    mean_seconds: Stat::Value(60.0),
                },
                GroupMean {
                    key: GenderMonth { gender: "Male".into(), month: 1 },
                    trips: 1,
                    mean_seconds: Stat::Unavailable(Unavailable::NoData),
                },
            ]),
        }
    }

    fn small_dataset() -> Dataset {
        Dataset {
            schema: [Field::TripDuration, Field::UserType].into_iter().collect(),
            records: vec![TripRecord {
                trip_duration_seconds: Some(90061.5),
                user_type: Some("Customer".into()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0 days 00:00:00");
        assert_eq!(format_duration(972.0), "0 days 00:16:12");
        assert_eq!(format_duration(90061.5), "1 days 01:01:01.5");
        assert_eq!(format_duration(489.066), "0 days 00:08:09.066");
    }

    #[test]
    fn test_format_duration_rounds_to_microseconds() {
        assert_eq!(format_duration(59.9999999), "0 days 00:01:00");
        assert_eq!(format_duration(10.0000001), "0 days 00:00:10");
        assert_eq!(format_duration(0.0000004), "0 days 00:00:00");
    }

    #[test]
    fn test_render_marks_unavailable() {
        let text = render(&StatsReport::from_dataset(&small_dataset(), BandMode::Literal));

        assert!(text.contains("Trips analysed: 1"));
        assert!(text.contains("No start time data to share."));
        assert!(text.contains("No gender data to share."));
        assert!(text.contains("Customer: 1"));
        assert!(text.contains("1 days 01:01:01.5"));
    }

    #[test]
    fn test_render_family_gender_table() {
        let text = render_family(&FamilyReport::GenderDuration(gender_report()));
        assert!(text.contains("Female"));
        assert!(text.contains("60.00"));
        assert!(text.contains("n/a"));
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&compute(&small_dataset(), Family::Users, BandMode::Literal));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&StatsReport::from_dataset(&small_dataset(), BandMode::Literal)).unwrap();
    }

    #[test]
    fn test_export_gender_series_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "series.csv");

        assert_eq!(export_gender_series(&path, &gender_report()).unwrap(), 2);
        assert_eq!(export_gender_series(&path, &gender_report()).unwrap(), 2);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // 1 header + 4 data rows
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "gender,month,trips,mean_seconds");
        assert_eq!(lines[1], "Female,1,2,60.0");
        assert_eq!(lines[2], "Male,1,1,");
    }

    #[test]
    fn test_export_without_data_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "empty.csv");
        let report = GenderDurationReport {
            by_gender_month: Stat::Unavailable(Unavailable::MissingColumns(vec![Field::Gender])),
        };

        assert_eq!(export_gender_series(&path, &report).unwrap(), 0);
        assert!(!Path::new(&path).exists());
    }
}
