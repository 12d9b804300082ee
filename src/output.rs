//! CSV persistence for collected and merged tables

use anyhow::{Context, Result};
use csv::Writer;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::collector::Dataset;
use crate::indicators::Indicator;
use crate::merge::MergedRecord;
use crate::utils::format_csv_value;

pub const COUNTRY_CODE_COLUMN: &str = "country_code";
pub const COUNTRY_NAME_COLUMN: &str = "country_name";
pub const YEAR_COLUMN: &str = "year";

/// Header row for a per-indicator table
pub fn indicator_headers(indicator: &Indicator) -> Vec<String> {
    vec![
        COUNTRY_CODE_COLUMN.to_string(),
        COUNTRY_NAME_COLUMN.to_string(),
        YEAR_COLUMN.to_string(),
        indicator.column.clone(),
    ]
}

/// Header row for the merged table: a suffixed year column before each value column
pub fn merged_headers(indicators: &[Indicator]) -> Vec<String> {
    let mut headers = vec![
        COUNTRY_CODE_COLUMN.to_string(),
        COUNTRY_NAME_COLUMN.to_string(),
    ];
    for indicator in indicators {
        headers.push(format!("{}_{}", YEAR_COLUMN, indicator.suffix));
        headers.push(indicator.column.clone());
    }
    headers
}

/// Write one indicator's dataset. The header is written even when empty.
pub fn write_indicator_table<W: Write>(writer: W, dataset: &Dataset) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(indicator_headers(&dataset.indicator))?;
    for record in &dataset.records {
        wtr.write_record([
            record.country_code.clone(),
            record.country_name.clone(),
            record.year.to_string(),
            format_csv_value(record.value),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_merged_table<W: Write>(
    writer: W,
    indicators: &[Indicator],
    rows: &[MergedRecord],
) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(merged_headers(indicators))?;
    for row in rows {
        let mut fields = vec![row.country_code.clone(), row.country_name.clone()];
        for obs in &row.observations {
            fields.push(obs.year.to_string());
            fields.push(format_csv_value(obs.value));
        }
        wtr.write_record(&fields)?;
    }
    wtr.flush()?;
    Ok(())
}

fn create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    fs::File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}

pub fn write_indicator_csv(path: &Path, dataset: &Dataset) -> Result<()> {
    let file = create_file(path)?;
    write_indicator_table(file, dataset)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(
        "Wrote {} rows for {} to {}",
        dataset.len(),
        dataset.indicator.code,
        path.display()
    );
    Ok(())
}

pub fn write_merged_csv(path: &Path, indicators: &[Indicator], rows: &[MergedRecord]) -> Result<()> {
    let file = create_file(path)?;
    write_merged_table(file, indicators, rows)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} merged rows to {}", rows.len(), path.display());
    Ok(())
}
