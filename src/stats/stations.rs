use super::types::StationReport;
use super::utility::{mode, with_columns};
use crate::records::{Dataset, Field};

impl StationReport {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            most_common_start: with_columns(dataset, &[Field::StartStation], || {
                mode(dataset.iter().filter_map(|r| r.start_station.as_deref())).map(str::to_string)
            }),
            most_common_end: with_columns(dataset, &[Field::EndStation], || {
                mode(dataset.iter().filter_map(|r| r.end_station.as_deref())).map(str::to_string)
            }),
            most_common_trip: with_columns(dataset, &[Field::StartStation, Field::EndStation], || {
                mode(dataset.iter().filter_map(|r| {
                    match (&r.start_station, &r.end_station) {
                        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
                        _ => None,
                    }
                }))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TripRecord;
    use crate::stats::types::{Stat, Unavailable};

    fn trip(start: Option<&str>, end: Option<&str>) -> TripRecord {
        TripRecord {
            start_station: start.map(String::from),
            end_station: end.map(String::from),
            ..Default::default()
        }
    }

    fn dataset(records: Vec<TripRecord>) -> Dataset {
        Dataset {
            schema: [Field::StartStation, Field::EndStation].into_iter().collect(),
            records,
            ..Default::default()
        }
    }

    #[test]
    fn test_station_report() {
        let report = StationReport::from_dataset(&dataset(vec![
            trip(Some("Canal St"), Some("Clark St")),
            trip(Some("Canal St"), Some("Lake Shore")),
            trip(Some("Lake Shore"), Some("Clark St")),
            trip(Some("Lake Shore"), Some("Clark St")),
            trip(Some("Lake Shore"), None),
        ]));

        assert_eq!(report.most_common_start, Stat::Value("Lake Shore".to_string()));
        assert_eq!(report.most_common_end, Stat::Value("Clark St".to_string()));
        assert_eq!(
            report.most_common_trip,
            Stat::Value("Lake Shore - Clark St".to_string())
        );
    }

    #[test]
    fn test_station_tie_breaks_lexicographically() {
        let report = StationReport::from_dataset(&dataset(vec![
            trip(Some("Wells St"), Some("B")),
            trip(Some("Ashland Ave"), Some("A")),
            trip(Some("Wells St"), Some("B")),
            trip(Some("Ashland Ave"), Some("A")),
        ]));
        assert_eq!(report.most_common_start, Stat::Value("Ashland Ave".to_string()));
        assert_eq!(report.most_common_trip, Stat::Value("Ashland Ave - A".to_string()));
    }

    #[test]
    fn test_trip_needs_both_columns() {
        let dataset = Dataset {
            schema: [Field::StartStation].into_iter().collect(),
            records: vec![trip(Some("A"), None)],
            ..Default::default()
        };
        let report = StationReport::from_dataset(&dataset);

        assert_eq!(report.most_common_start, Stat::Value("A".to_string()));
        assert_eq!(
            report.most_common_trip,
            Stat::Unavailable(Unavailable::MissingColumns(vec![Field::EndStation]))
        );
    }
}
