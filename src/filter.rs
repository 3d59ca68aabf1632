//! Validation and macro expansion of raw filter tokens into a [`FilterSpec`].
//!
//! Every builder lowercases its input, expands macros (`a` for every
//! dimension, plus `wdays`/`wends` for weekdays) and rejects the whole set if
//! it is empty or any remaining token is unknown. Retrying on
//! [`Error::InvalidToken`] is left to the caller.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::catalog::{self, ALL_MACRO, MONTHS, Source, Weekday};
use crate::error::{Dimension, Error, Result};

/// Canonical, validated selection of sources, months and weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub sources: BTreeSet<Source>,
    pub months: BTreeSet<u32>,
    pub weekdays: BTreeSet<Weekday>,
}

impl FilterSpec {
    /// Builds a spec from one raw token set per dimension.
    pub fn from_tokens<S: AsRef<str>>(sources: &[S], months: &[S], weekdays: &[S]) -> Result<Self> {
        Ok(Self {
            sources: build_sources(sources)?,
            months: build_months(months)?,
            weekdays: build_weekdays(weekdays)?,
        })
    }

    pub fn includes_month(&self, month: u32) -> bool {
        self.months.contains(&month)
    }

    pub fn includes_weekday(&self, day: Weekday) -> bool {
        self.weekdays.contains(&day)
    }
}

impl Default for FilterSpec {
    /// All sources, all canonical months, all seven weekdays.
    fn default() -> Self {
        Self {
            sources: Source::ALL.into_iter().collect(),
            months: MONTHS.into_iter().collect(),
            weekdays: Weekday::ALL.into_iter().collect(),
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cities: Vec<_> = self.sources.iter().map(|s| s.name()).collect();
        cities.sort_unstable();
        let months: Vec<_> = self.months.iter().map(u32::to_string).collect();
        let mut days: Vec<_> = self.weekdays.iter().map(|d| d.name()).collect();
        days.sort_unstable();

        writeln!(f, "Current filters:")?;
        writeln!(f, "  Cities: {}", cities.join(", "))?;
        writeln!(f, "  Months: {}", months.join(", "))?;
        write!(f, "  Days: {}", days.join(", "))
    }
}

/// Splits a raw input line on whitespace into a normalized token set.
pub fn parse_tokens(line: &str) -> BTreeSet<String> {
    normalize_tokens(line.split_whitespace())
}

/// Lowercases every token; duplicates collapse.
pub fn normalize_tokens<I, S>(tokens: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .collect()
}

/// Replaces weekday macros with the canonical keys they stand for.
///
/// Idempotent: expanding an already expanded set returns it unchanged.
pub fn expand_weekday_macros(mut tokens: BTreeSet<String>) -> BTreeSet<String> {
    for name in [ALL_MACRO, catalog::WEEKDAYS_MACRO, catalog::WEEKENDS_MACRO] {
        if tokens.remove(name) {
            if let Some(days) = catalog::weekday_macro(name) {
                tokens.extend(days.iter().map(|d| d.key().to_string()));
            }
        }
    }
    tokens
}

pub fn build_sources<S: AsRef<str>>(tokens: &[S]) -> Result<BTreeSet<Source>> {
    let mut tokens = normalize_tokens(tokens);
    if tokens.is_empty() {
        return Err(Error::empty_selection(Dimension::Sources));
    }
    if tokens.remove(ALL_MACRO) {
        tokens.extend(Source::ALL.iter().map(|s| s.key().to_string()));
    }

    tokens
        .iter()
        .map(|t| Source::from_key(t).ok_or_else(|| Error::invalid_token(Dimension::Sources, t)))
        .collect()
}

pub fn build_months<S: AsRef<str>>(tokens: &[S]) -> Result<BTreeSet<u32>> {
    let mut tokens = normalize_tokens(tokens);
    if tokens.is_empty() {
        return Err(Error::empty_selection(Dimension::Months));
    }
    if tokens.remove(ALL_MACRO) {
        tokens.extend(MONTHS.iter().map(u32::to_string));
    }

    tokens
        .iter()
        .map(|t| {
            MONTHS
                .iter()
                .copied()
                .find(|m| m.to_string() == *t)
                .ok_or_else(|| Error::invalid_token(Dimension::Months, t))
        })
        .collect()
}

pub fn build_weekdays<S: AsRef<str>>(tokens: &[S]) -> Result<BTreeSet<Weekday>> {
    let tokens = expand_weekday_macros(normalize_tokens(tokens));
    if tokens.is_empty() {
        return Err(Error::empty_selection(Dimension::Weekdays));
    }

    tokens
        .iter()
        .map(|t| Weekday::from_key(t).ok_or_else(|| Error::invalid_token(Dimension::Weekdays, t)))
        .collect()
}
