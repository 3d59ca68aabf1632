//! Static registries: known sources, canonical weekdays, the month range and
//! the weekday group macros.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One origin of trip records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Chicago,
    NewYorkCity,
    Washington,
}

impl Source {
    /// All known sources, in catalog order.
    pub const ALL: [Source; 3] = [Source::Chicago, Source::NewYorkCity, Source::Washington];

    /// Short selection key typed by the user.
    pub fn key(self) -> &'static str {
        match self {
            Source::Chicago => "c",
            Source::NewYorkCity => "n",
            Source::Washington => "w",
        }
    }

    /// Lowercase display name, also used as the key in locator overrides.
    pub fn name(self) -> &'static str {
        match self {
            Source::Chicago => "chicago",
            Source::NewYorkCity => "new york city",
            Source::Washington => "washington",
        }
    }

    /// Default backing record locator (file name relative to the data directory).
    pub fn locator(self) -> &'static str {
        match self {
            Source::Chicago => "chicago.csv",
            Source::NewYorkCity => "new_york_city.csv",
            Source::Washington => "washington.csv",
        }
    }

    pub fn from_key(key: &str) -> Option<Source> {
        Source::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn from_name(name: &str) -> Option<Source> {
        Source::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical day of week. Ordering follows the canonical Monday..Sunday list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Short macro key (`m`, `t`, `w`, `th`, `f`, `s`, `su`).
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "m",
            Weekday::Tuesday => "t",
            Weekday::Wednesday => "w",
            Weekday::Thursday => "th",
            Weekday::Friday => "f",
            Weekday::Saturday => "s",
            Weekday::Sunday => "su",
        }
    }

    pub fn from_key(key: &str) -> Option<Weekday> {
        Weekday::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Months covered by the dataset, as selectable by the filter.
pub const MONTHS: [u32; 6] = [1, 2, 3, 4, 5, 6];

/// Token that selects every known value of a dimension.
pub const ALL_MACRO: &str = "a";
pub const WEEKDAYS_MACRO: &str = "wdays";
pub const WEEKENDS_MACRO: &str = "wends";

/// Weekday group macros and the canonical weekday keys they expand to.
pub fn weekday_macro(token: &str) -> Option<&'static [Weekday]> {
    match token {
        ALL_MACRO => Some(&Weekday::ALL),
        WEEKDAYS_MACRO => Some(&Weekday::ALL[..5]),
        WEEKENDS_MACRO => Some(&Weekday::ALL[5..]),
        _ => None,
    }
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lookup() {
        assert_eq!(Source::from_key("c"), Some(Source::Chicago));
        assert_eq!(Source::from_key("n"), Some(Source::NewYorkCity));
        assert_eq!(Source::from_key("x"), None);
        assert_eq!(Source::from_name("washington"), Some(Source::Washington));
        assert_eq!(Source::NewYorkCity.locator(), "new_york_city.csv");
    }

    #[test]
    fn test_weekday_macros() {
        assert_eq!(weekday_macro("a").unwrap().len(), 7);
        assert_eq!(
            weekday_macro("wdays").unwrap(),
            &[
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday
            ]
        );
        assert_eq!(
            weekday_macro("wends").unwrap(),
            &[Weekday::Saturday, Weekday::Sunday]
        );
        assert!(weekday_macro("th").is_none());
    }

    #[test]
    fn test_weekday_keys_round_trip_catalog_order() {
        let keys: Vec<_> = Weekday::ALL.iter().map(|d| d.key()).collect();
        assert_eq!(keys, vec!["m", "t", "w", "th", "f", "s", "su"]);
        assert_eq!(Weekday::from_key("su"), Some(Weekday::Sunday));
    }

    #[test]
    fn test_from_chrono_weekday() {
        assert_eq!(Weekday::from(chrono::Weekday::Thu), Weekday::Thursday);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(6), Some("June"));
        assert_eq!(month_name(13), None);
        assert_eq!(month_name(0), None);
    }
}
