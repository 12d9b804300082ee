use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;

#[derive(Parser)]
#[command(name = "country-indicators")]
#[command(
    version,
    about = "Collect the latest GDP per capita and population per country into CSV tables"
)]
#[command(
    long_about = "Fetch indicator series from a DataBank-style API for a list of countries, keep the most recent non-null value of each, and write per-indicator and merged CSV files."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch indicators for every configured country and write the CSV files
    Collect(CollectArgs),

    /// List the configured country codes
    Countries {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Rank countries from a merged CSV file
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CollectArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the CSV files (default: data)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// API root serving DataBank/indicator_data
    #[arg(long, env = "COUNTRY_INDICATORS_BASE_URL")]
    pub base_url: Option<String>,

    /// Pause between countries in milliseconds (default: 100)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Only collect these country codes (repeatable)
    #[arg(long = "country", value_name = "CODE")]
    pub countries: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Merged CSV file
    #[arg(default_value = "data/merged_economic_data.csv")]
    pub file: PathBuf,

    /// Number of countries per ranking
    #[arg(short, long, default_value_t = 5)]
    pub top: usize,

    /// Value columns to rank by (repeatable)
    #[arg(long = "by", value_name = "COLUMN", default_values_t = vec!["gdp_per_capita".to_string(), "population".to_string()])]
    pub by: Vec<String>,

    /// Ignore countries below this population
    #[arg(long)]
    pub min_population: Option<f64>,
}
