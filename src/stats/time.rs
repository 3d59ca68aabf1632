use chrono::Timelike;

use super::types::TimeReport;
use super::utility::{mode, with_columns};
use crate::catalog::month_name;
use crate::records::{Dataset, Field};

impl TimeReport {
    /// Most common start hour, month name and weekday name.
    ///
    /// Month and weekday ties resolve by name, alphabetically.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            most_common_hour: with_columns(dataset, &[Field::StartTime], || {
                mode(dataset.iter().filter_map(|r| r.start_time.map(|ts| ts.hour())))
            }),
            most_common_month: with_columns(dataset, &[Field::StartTime, Field::Month], || {
                mode(dataset.iter().filter_map(|r| r.month.and_then(month_name)))
                    .map(str::to_string)
            }),
            most_common_day: with_columns(dataset, &[Field::DayOfWeek], || {
                mode(dataset.iter().filter_map(|r| r.day_of_week.map(|d| d.name())))
                    .map(str::to_string)
            }),
        }
    }
}
