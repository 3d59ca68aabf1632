use std::collections::BTreeMap;

use super::types::{GroupMean, Stat, Unavailable};
use crate::records::{Dataset, Field};

/// Most frequent value; ties go to the smallest value under `Ord`.
pub fn mode<T: Ord, I: IntoIterator<Item = T>>(values: I) -> Option<T> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        // ascending iteration: strictly greater keeps the smallest tied value
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Arithmetic mean. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population mean of each group's present values, groups in ascending key order.
pub fn group_means<K, I>(rows: I) -> Vec<GroupMean<K>>
where
    K: Ord,
    I: IntoIterator<Item = (K, Option<f64>)>,
{
    let mut groups: BTreeMap<K, (usize, Vec<f64>)> = BTreeMap::new();
    for (key, value) in rows {
        let entry = groups.entry(key).or_default();
        entry.0 += 1;
        entry.1.extend(value);
    }

    groups
        .into_iter()
        .map(|(key, (trips, values))| GroupMean {
            key,
            trips,
            mean_seconds: mean(&values).into(),
        })
        .collect()
}

/// `None` for an empty group list, so it reports as no data.
pub fn non_empty<T>(groups: Vec<T>) -> Option<Vec<T>> {
    (!groups.is_empty()).then_some(groups)
}

/// Runs `compute` only if every `required` column is in the dataset schema.
pub fn with_columns<T>(
    dataset: &Dataset,
    required: &[Field],
    compute: impl FnOnce() -> Option<T>,
) -> Stat<T> {
    let missing = dataset.schema.missing(required);
    if !missing.is_empty() {
        return Stat::Unavailable(Unavailable::MissingColumns(missing));
    }
    compute().into()
}
