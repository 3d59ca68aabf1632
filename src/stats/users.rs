use std::collections::BTreeMap;

use super::types::{BirthYearSummary, GroupCount, UserReport};
use super::utility::{mode, non_empty, with_columns};
use crate::records::{Dataset, Field};

impl UserReport {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            user_types: with_columns(dataset, &[Field::UserType], || {
                non_empty(count_by(dataset.iter().filter_map(|r| r.user_type.as_deref())))
            }),
            genders: with_columns(dataset, &[Field::Gender], || {
                non_empty(count_by(dataset.iter().filter_map(|r| r.gender.as_deref())))
            }),
            birth_years: with_columns(dataset, &[Field::BirthYear], || {
                birth_year_summary(dataset.iter().filter_map(|r| r.birth_year))
            }),
        }
    }
}

/// Counts each distinct value; groups come back in ascending value order.
pub fn count_by<'a, I: IntoIterator<Item = &'a str>>(values: I) -> Vec<GroupCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| GroupCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

fn birth_year_summary<I: IntoIterator<Item = i32>>(years: I) -> Option<BirthYearSummary> {
    let years: Vec<i32> = years.into_iter().collect();
    Some(BirthYearSummary {
        earliest: *years.iter().min()?,
        most_recent: *years.iter().max()?,
        most_common: mode(years.iter().copied())?,
    })
}
