use std::fs;
use std::path::PathBuf;

use bikeshare_stats::catalog::{Source, Weekday};
use bikeshare_stats::config::Config;
use bikeshare_stats::loader::load_with_year;
use bikeshare_stats::output::{export_gender_series, render};
use bikeshare_stats::prompt::Prompter;
use bikeshare_stats::reader::{CsvSourceReader, SourceReader};
use bikeshare_stats::records::Field;
use bikeshare_stats::stats::{AgeBand, BandMode, Family, GroupCount, Stat, Unavailable};
use bikeshare_stats::{Error, FilterSpec, Session};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn reader() -> CsvSourceReader {
    CsvSourceReader::new(fixtures())
}

fn session(spec: FilterSpec, bands: BandMode) -> Session {
    let dataset = load_with_year(&spec, &reader(), 2017).expect("Failed to load fixtures");
    Session::from_parts(spec, dataset).with_band_mode(bands)
}

fn spec(cities: &[&str], months: &[&str], days: &[&str]) -> FilterSpec {
    FilterSpec::from_tokens(cities, months, days).expect("valid tokens")
}

#[test]
fn test_full_pipeline_all_sources() {
    let report = session(FilterSpec::default(), BandMode::Literal).report();

    assert_eq!(report.records, 12);
    assert_eq!(
        report.users.user_types,
        Stat::Value(vec![
            GroupCount { value: "Customer".into(), count: 1 },
            GroupCount { value: "Subscriber".into(), count: 11 },
        ])
    );
    // Washington has no gender column, but the merged schema does
    assert_eq!(
        report.users.genders,
        Stat::Value(vec![
            GroupCount { value: "Female".into(), count: 2 },
            GroupCount { value: "Male".into(), count: 7 },
        ])
    );
    // every start station is unique, so the smallest name wins
    assert_eq!(
        report.stations.most_common_start,
        Stat::Value("14th & Belmont St NW".into())
    );
    assert!(report.duration.total_seconds.is_available());
}

#[test]
fn test_washington_only_reports_missing_columns() {
    let report = session(spec(&["w"], &["a"], &["a"]), BandMode::Literal).report();

    assert_eq!(report.records, 3);
    assert_eq!(
        report.users.genders,
        Stat::Unavailable(Unavailable::MissingColumns(vec![Field::Gender]))
    );
    assert!(!report.users.birth_years.is_available());
    assert!(!report.age_duration.by_band.is_available());
    assert!(!report.gender_duration.by_gender_month.is_available());

    // hours 8, 10 and 1 each occur once
    assert_eq!(report.time.most_common_hour, Stat::Value(1));
    assert_eq!(report.time.most_common_month, Stat::Value("June".into()));
    assert_eq!(report.time.most_common_day, Stat::Value("Saturday".into()));

    let total = *report.duration.total_seconds.value().unwrap();
    assert!((total - 1528.866).abs() < 1e-6);

    let text = render(&report);
    assert!(text.contains("No gender data to share."));
    assert!(text.contains("No birth year data to share."));
}

#[test]
fn test_month_filter_on_chicago() {
    let session = session(spec(&["c"], &["1"], &["a"]), BandMode::Literal);
    let report = session.report();

    assert_eq!(report.records, 2);
    assert!(session.dataset().iter().all(|r| r.month == Some(1)));
    assert_eq!(
        report.users.genders,
        Stat::Value(vec![GroupCount { value: "Male".into(), count: 2 }])
    );

    let years = report.users.birth_years.value().copied().unwrap();
    assert_eq!(years.earliest, 1975);
    assert_eq!(years.most_recent, 1981);
    // 1975 and 1981 tie, the smaller year wins
    assert_eq!(years.most_common, 1975);
}

#[test]
fn test_weekend_macro() {
    let session = session(spec(&["a"], &["a"], &["wends"]), BandMode::Literal);

    // 2017-06-11 (Sunday, New York City) and 2017-03-11 (Saturday, Washington)
    assert_eq!(session.dataset().len(), 2);
    assert!(session.dataset().iter().all(|r| matches!(
        r.day_of_week,
        Some(Weekday::Saturday | Weekday::Sunday)
    )));
}

#[test]
fn test_filter_with_no_matches_yields_no_data() {
    let session = session(spec(&["w"], &["1"], &["a"]), BandMode::Literal);
    let report = session.report();

    assert_eq!(report.records, 0);
    assert_eq!(
        report.time.most_common_hour,
        Stat::Unavailable(Unavailable::NoData)
    );
    assert_eq!(report.duration.mean_seconds, Stat::Unavailable(Unavailable::NoData));
    assert_eq!(report.users.user_types, Stat::Unavailable(Unavailable::NoData));
}

#[test]
fn test_literal_and_disjoint_age_bands() {
    let cities = spec(&["c", "n"], &["a"], &["a"]);

    let literal = session(cities.clone(), BandMode::Literal).report().age_duration;
    let disjoint = session(cities, BandMode::Disjoint).report().age_duration;

    let june_mean = |report: &bikeshare_stats::stats::AgeDurationReport, band: AgeBand| {
        report
            .by_band
            .value()
            .unwrap()
            .iter()
            .find(|s| s.band == band)
            .and_then(|s| s.by_month.iter().find(|g| g.key == 6))
            .and_then(|g| g.mean_seconds.value().copied())
    };

    // ages in 2017: 25 (Chicago, June) and 19 (New York City, June)
    assert_eq!(june_mean(&literal, AgeBand::Under30), Some((321.0 + 795.0) / 2.0));
    assert_eq!(june_mean(&disjoint, AgeBand::Under30), Some(321.0));
    assert_eq!(june_mean(&literal, AgeBand::Under20), Some(795.0));
    assert_eq!(june_mean(&disjoint, AgeBand::Under20), Some(795.0));
}

#[test]
fn test_gender_series_and_export() {
    let report = session(FilterSpec::default(), BandMode::Literal)
        .report()
        .gender_duration;

    assert_eq!(report.genders(), vec!["Female", "Male"]);
    assert_eq!(report.series("Female"), vec![(5, (1610.0 + 703.0) / 2.0)]);
    assert!(report.series("Male").contains(&(1, (416.0 + 534.0) / 2.0)));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gender.csv").display().to_string();
    let rows = export_gender_series(&path, &report).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), rows + 1);
    assert!(content.starts_with("gender,month,trips,mean_seconds"));
}

#[test]
fn test_families_computed_one_at_a_time_match_full_report() {
    let session = session(FilterSpec::default(), BandMode::Disjoint);
    let report = session.report();

    for family in Family::ALL {
        assert_eq!(session.compute(family), report.family(family));
    }
}

#[test]
fn test_invalid_tokens_are_rejected() {
    let err = FilterSpec::from_tokens(&["c", "x"], &["a"], &["a"]).unwrap_err();
    assert!(err.is_invalid_token());

    let err = FilterSpec::from_tokens(&["c"], &["7"], &["a"]).unwrap_err();
    assert!(err.is_invalid_token());

    let empty: [&str; 0] = [];
    let err = FilterSpec::from_tokens(&empty, &empty, &empty).unwrap_err();
    assert!(err.is_invalid_token());
}

#[test]
fn test_missing_source_file_is_data_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let reader = CsvSourceReader::new(dir.path());

    let err = Session::start(FilterSpec::default(), &reader).unwrap_err();
    assert!(matches!(err, Error::DataSource { .. }));
}

#[test]
fn test_malformed_timestamp_is_data_source_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("broken.csv"),
        ",Start Time,Trip Duration\n1,not a time,60\n",
    )
    .unwrap();
    let reader = CsvSourceReader::new(dir.path()).with_locator(Source::Chicago, "broken.csv");

    let err = reader.read(Source::Chicago).unwrap_err();
    match err {
        Error::DataSource { source_name, .. } => assert_eq!(source_name, "chicago"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_config_locators_redirect_sources() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        fixtures().join("washington.csv"),
        dir.path().join("dc_2017.csv"),
    )
    .unwrap();

    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        format!(
            r#"{{ "data_dir": "{}", "locators": {{ "washington": "dc_2017.csv" }} }}"#,
            dir.path().display()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    let reader = CsvSourceReader::from_config(&config).unwrap();
    let part = reader.read(Source::Washington).unwrap();

    assert_eq!(part.records.len(), 3);
    assert!(!part.schema.contains(Field::Gender));
}

#[test]
fn test_interactive_run_over_fixtures() {
    // bulk, filter: chicago / January / all days, then exit
    let input = "y\ny\nc\n1\na\nn\n";
    let mut prompter = Prompter::new(input.as_bytes(), Vec::new());

    let sessions = prompter.run(&reader(), BandMode::Literal).unwrap();
    assert_eq!(sessions, 1);

    let text = String::from_utf8(prompter.into_output()).unwrap();
    assert!(text.contains("Cities: chicago"));
    assert!(text.contains("Months: 1\n"));
    assert!(text.contains("Subscriber: 2"));
}
