//! Sequential collection loop
//!
//! Walks the country list in order, fetches every indicator for each
//! country, and keeps the latest non-null observation. A failed call is
//! reported and treated as "no data"; the run always continues.

use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::indicators::client::IndicatorSource;
use crate::indicators::{Indicator, IndicatorRecord};

/// Records gathered for one indicator, in country-list order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub indicator: Indicator,
    pub records: Vec<IndicatorRecord>,
}

impl Dataset {
    pub fn new(indicator: Indicator) -> Self {
        Self {
            indicator,
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// A call that failed and was skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchFailure {
    pub country_code: String,
    pub indicator_code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub datasets: Vec<Dataset>,
    pub failures: Vec<FetchFailure>,
}

/// Progress events emitted while collecting
#[derive(Debug, Clone, PartialEq)]
pub enum CollectProgress<'a> {
    /// About to process country `index` (1-based) of `total`
    Country {
        index: usize,
        total: usize,
        country_code: &'a str,
    },
    /// A call failed and the country/indicator is skipped
    Failed(&'a FetchFailure),
    /// The response had no usable value
    NoData {
        country_code: &'a str,
        indicator_code: &'a str,
    },
}

/// Fetch all indicators for all countries, one request at a time.
///
/// `delay` is slept between consecutive countries.
pub async fn collect<S: IndicatorSource>(
    source: &S,
    countries: &[String],
    indicators: &[Indicator],
    delay: Duration,
    progress: Option<&dyn Fn(&CollectProgress)>,
) -> Collection {
    let mut datasets: Vec<Dataset> = indicators.iter().cloned().map(Dataset::new).collect();
    let mut failures = Vec::new();
    let total = countries.len();

    info!(
        "Collecting {} indicators for {} countries",
        indicators.len(),
        total
    );

    for (i, country_code) in countries.iter().enumerate() {
        if let Some(cb) = progress {
            cb(&CollectProgress::Country {
                index: i + 1,
                total,
                country_code,
            });
        }

        for dataset in datasets.iter_mut() {
            let indicator_code = dataset.indicator.code.as_str();
            match source.fetch(indicator_code, country_code).await {
                Ok(response) => match response.to_record(country_code) {
                    Some(record) => dataset.records.push(record),
                    None => {
                        info!("No data for {}, {}", country_code, indicator_code);
                        if let Some(cb) = progress {
                            cb(&CollectProgress::NoData {
                                country_code,
                                indicator_code,
                            });
                        }
                    }
                },
                Err(e) => {
                    warn!(
                        "Error getting data for {}, {}: {}",
                        country_code, indicator_code, e
                    );
                    let failure = FetchFailure {
                        country_code: country_code.clone(),
                        indicator_code: indicator_code.to_string(),
                        message: e.to_string(),
                    };
                    if let Some(cb) = progress {
                        cb(&CollectProgress::Failed(&failure));
                    }
                    failures.push(failure);
                }
            }
        }

        if !delay.is_zero() && i + 1 < total {
            tokio::time::sleep(delay).await;
        }
    }

    for dataset in &datasets {
        info!(
            "Collected {} records for {}",
            dataset.len(),
            dataset.indicator.code
        );
    }

    Collection { datasets, failures }
}
