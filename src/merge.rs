//! Inner join of per-indicator datasets
//!
//! Rows are matched on `(country_code, country_name)`. Only countries present
//! in every dataset survive, in the order of the first dataset.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::collector::Dataset;
use crate::error::MergeError;
use crate::indicators::Observation;

/// One joined row: a country plus one observation per indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    pub country_code: String,
    pub country_name: String,
    /// Same order as the datasets passed to [`merge_datasets`]
    pub observations: Vec<Observation>,
}

type JoinKey<'a> = (&'a str, &'a str);

/// Join datasets on `(country_code, country_name)`.
///
/// Fails with [`MergeError::EmptyDataset`] when any dataset is empty, so no
/// merged table is produced from partial input.
pub fn merge_datasets(datasets: &[Dataset]) -> Result<Vec<MergedRecord>, MergeError> {
    if datasets.len() < 2 {
        return Err(MergeError::NotEnoughDatasets(datasets.len()));
    }
    if datasets.iter().any(Dataset::is_empty) {
        return Err(MergeError::EmptyDataset);
    }

    let (first, rest) = datasets.split_first().ok_or(MergeError::NotEnoughDatasets(0))?;

    let lookups: Vec<HashMap<JoinKey<'_>, Observation>> = rest
        .iter()
        .map(|dataset| {
            let mut map = HashMap::with_capacity(dataset.len());
            for r in &dataset.records {
                map.entry((r.country_code.as_str(), r.country_name.as_str()))
                    .or_insert(Observation {
                        year: r.year,
                        value: r.value,
                    });
            }
            map
        })
        .collect();

    let mut merged = Vec::new();
    'rows: for record in &first.records {
        let key = (record.country_code.as_str(), record.country_name.as_str());
        let mut observations = Vec::with_capacity(datasets.len());
        observations.push(Observation {
            year: record.year,
            value: record.value,
        });

        for lookup in &lookups {
            match lookup.get(&key) {
                Some(obs) => observations.push(*obs),
                None => {
                    debug!("{} ({}) missing from another dataset", key.0, key.1);
                    continue 'rows;
                }
            }
        }

        merged.push(MergedRecord {
            country_code: record.country_code.clone(),
            country_name: record.country_name.clone(),
            observations,
        });
    }

    info!("Merged {} countries", merged.len());
    Ok(merged)
}
