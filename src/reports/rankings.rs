//! Country rankings over a merged CSV
//!
//! Reads a merged table back and ranks countries by any of its value
//! columns (e.g. richest by GDP per capita, most populous).

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::output::{COUNTRY_CODE_COLUMN, COUNTRY_NAME_COLUMN, YEAR_COLUMN};

/// A row of the merged table with value columns keyed by name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRow {
    pub country_code: String,
    pub country_name: String,
    pub values: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub country_code: String,
    pub country_name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub column: String,
    pub entries: Vec<RankingEntry>,
}

#[derive(Debug)]
struct ColumnMapping {
    code: usize,
    name: usize,
    values: Vec<(usize, String)>,
}

fn find_columns(headers: &csv::StringRecord) -> Result<ColumnMapping> {
    let mut code = None;
    let mut name = None;
    let mut values = Vec::new();

    for (idx, header) in headers.iter().enumerate() {
        let text = header.trim();
        if text == COUNTRY_CODE_COLUMN {
            code = Some(idx);
        } else if text == COUNTRY_NAME_COLUMN {
            name = Some(idx);
        } else if text != YEAR_COLUMN && !text.starts_with(&format!("{}_", YEAR_COLUMN)) {
            values.push((idx, text.to_string()));
        }
    }

    if values.is_empty() {
        return Err(anyhow!("No value columns found"));
    }

    Ok(ColumnMapping {
        code: code.ok_or_else(|| anyhow!("Column '{}' not found", COUNTRY_CODE_COLUMN))?,
        name: name.ok_or_else(|| anyhow!("Column '{}' not found", COUNTRY_NAME_COLUMN))?,
        values,
    })
}

/// Read a merged table written by the collector
pub fn load_merged_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MergedRow>> {
    let path = path.as_ref();
    info!("Reading merged table: {}", path.display());

    let mut reader = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .clone();
    let mapping = find_columns(&headers)?;
    debug!("Column mapping: {:?}", mapping);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.context("Failed to read CSV record")?;
        let line = idx + 2;

        let code = record.get(mapping.code).unwrap_or("").trim();
        if code.is_empty() {
            warn!("Skipping row {}: missing country code", line);
            continue;
        }

        let mut values = BTreeMap::new();
        for (col_idx, column) in &mapping.values {
            let Some(raw) = record.get(*col_idx) else {
                continue;
            };
            match raw.trim().parse::<f64>() {
                Ok(v) => {
                    values.insert(column.clone(), v);
                }
                Err(_) => warn!("Row {}: '{}' is not a number in {}", line, raw, column),
            }
        }

        rows.push(MergedRow {
            country_code: code.to_string(),
            country_name: record.get(mapping.name).unwrap_or("").trim().to_string(),
            values,
        });
    }

    info!("Loaded {} merged rows", rows.len());
    Ok(rows)
}

/// Keep rows whose `column` is at least `min`; rows lacking it are dropped
pub fn filter_min<'a>(rows: &'a [MergedRow], column: &str, min: f64) -> Vec<&'a MergedRow> {
    rows.iter()
        .filter(|r| r.values.get(column).is_some_and(|v| *v >= min))
        .collect()
}

/// Top `top` rows by `column`, descending. Ties keep input order.
pub fn rank_by<'a, I>(rows: I, column: &str, top: usize) -> Ranking
where
    I: IntoIterator<Item = &'a MergedRow>,
{
    let mut candidates: Vec<(&MergedRow, f64)> = rows
        .into_iter()
        .filter_map(|r| r.values.get(column).map(|v| (r, *v)))
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let entries = candidates
        .into_iter()
        .take(top)
        .enumerate()
        .map(|(i, (row, value))| RankingEntry {
            rank: i + 1,
            country_code: row.country_code.clone(),
            country_name: row.country_name.clone(),
            value,
        })
        .collect();

    Ranking {
        column: column.to_string(),
        entries,
    }
}
