use super::types::{DurationReport, Stat};
use super::utility::{mean, with_columns};
use crate::records::{Dataset, Field};

impl DurationReport {
    /// Sum and mean over present durations only; absent values are not zeros.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let durations: Vec<f64> = dataset
            .iter()
            .filter_map(|r| r.trip_duration_seconds)
            .collect();

        let total_seconds = with_columns(dataset, &[Field::TripDuration], || {
            Some(durations.iter().sum::<f64>())
        });
        let mean_seconds = with_columns(dataset, &[Field::TripDuration], || mean(&durations));
        let counted = if total_seconds.is_available() {
            durations.len()
        } else {
            0
        };

        Self {
            total_seconds,
            mean_seconds,
            counted,
        }
    }

    /// Mean duration as whole seconds, if available.
    pub fn mean_whole_seconds(&self) -> Option<i64> {
        match &self.mean_seconds {
            Stat::Value(v) => Some(v.round() as i64),
            Stat::Unavailable(_) => None,
        }
    }
}
