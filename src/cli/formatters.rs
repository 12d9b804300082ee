//! Output formatting module for CLI display
//!
//! Keeps terminal and JSON rendering apart from collection and ranking logic.

use chrono::{DateTime, Utc};
use colored::Colorize;
use country_indicators::reports::Ranking;
use country_indicators::utils::{format_millions, format_number_with_width, format_usd, Unit};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Per-indicator outcome of a collect run
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub indicator: String,
    pub label: String,
    pub column: String,
    pub rows: usize,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub country_code: String,
    pub indicator_code: String,
    pub message: String,
}

/// Outcome of a collect run
#[derive(Debug, Clone, Serialize)]
pub struct CollectSummary {
    pub countries_requested: usize,
    pub datasets: Vec<DatasetSummary>,
    pub failures: Vec<FailureSummary>,
    pub merged_rows: Option<usize>,
    pub merged_path: Option<String>,
    pub error: Option<String>,
    pub finished_at: DateTime<Utc>,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

pub fn format_collect_json(summary: &CollectSummary) -> String {
    to_json(summary)
}

/// Format a collect summary for terminal table output
pub fn format_collect_table(summary: &CollectSummary) -> String {
    #[derive(Tabled)]
    struct DatasetRow {
        #[tabled(rename = "Indicator")]
        indicator: String,
        #[tabled(rename = "Series")]
        label: String,
        #[tabled(rename = "Column")]
        column: String,
        #[tabled(rename = "Countries")]
        rows: String,
        #[tabled(rename = "File")]
        path: String,
    }

    let mut output = match &summary.error {
        None => format!(
            "\n{} Collection finished for {} requested countries\n\n",
            "✓".green().bold(),
            summary.countries_requested
        ),
        Some(error) => format!(
            "\n{} Collection incomplete for {} requested countries: {}\n\n",
            "✗".red().bold(),
            summary.countries_requested,
            error
        ),
    };

    let rows: Vec<DatasetRow> = summary
        .datasets
        .iter()
        .map(|d| DatasetRow {
            indicator: d.indicator.clone(),
            label: d.label.clone(),
            column: d.column.clone(),
            rows: d.rows.to_string(),
            path: d.path.clone(),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..4)).with(Alignment::right()))
        .to_string();
    output.push_str(&table);
    output.push('\n');

    if !summary.failures.is_empty() {
        output.push_str(&format!(
            "\n{} {} failed requests (treated as no data)\n",
            "⚠".yellow().bold(),
            summary.failures.len()
        ));
    }

    output
}

pub fn format_countries_json(countries: &[String]) -> String {
    to_json(&countries)
}

/// Country codes, ten per line
pub fn format_countries_text(countries: &[String]) -> String {
    let mut output = format!("{} configured countries\n", countries.len());
    for chunk in countries.chunks(10) {
        output.push_str(&chunk.join(" "));
        output.push('\n');
    }
    output
}

pub fn format_rankings_json(rankings: &[Ranking]) -> String {
    to_json(&rankings)
}

/// Render a value according to the column it came from
pub fn format_indicator_value(column: &str, value: f64) -> String {
    match column {
        "gdp_per_capita" => format_usd(value),
        "population" => format_millions(value),
        _ => format_number_with_width(value, 0, Unit::None),
    }
}

fn ranking_title(column: &str) -> String {
    match column {
        "gdp_per_capita" => "Richest Countries (GDP per capita)".to_string(),
        "population" => "Most Populous Countries".to_string(),
        other => format!("Top Countries by {}", other),
    }
}

pub fn format_rankings_table(rankings: &[Ranking]) -> String {
    #[derive(Tabled)]
    struct RankRow {
        #[tabled(rename = "#")]
        rank: String,
        #[tabled(rename = "Code")]
        code: String,
        #[tabled(rename = "Country")]
        name: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    let mut output = String::new();
    for ranking in rankings {
        output.push_str(&format!(
            "\n{} {}\n\n",
            "📊".cyan().bold(),
            ranking_title(&ranking.column).as_str().bold()
        ));

        if ranking.entries.is_empty() {
            output.push_str(&format!("{}\n", "No data for this column".dimmed()));
            continue;
        }

        let rows: Vec<RankRow> = ranking
            .entries
            .iter()
            .map(|e| RankRow {
                rank: e.rank.to_string(),
                code: e.country_code.clone(),
                name: e.country_name.clone(),
                value: format_indicator_value(&ranking.column, e.value),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(3..4)).with(Alignment::right()))
            .to_string();
        output.push_str(&table);
        output.push('\n');
    }
    output
}
