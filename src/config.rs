//! Run configuration
//!
//! Built-in defaults reproduce the standard 100-country, two-indicator run.
//! An optional TOML file can override any of them; command-line flags are
//! applied on top by the CLI layer.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::indicators::Indicator;
use crate::output::{COUNTRY_CODE_COLUMN, COUNTRY_NAME_COLUMN, YEAR_COLUMN};

pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/databank";
pub const DEFAULT_DELAY_MS: u64 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; CountryIndicators/0.1)";
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const MERGED_FILENAME: &str = "merged_economic_data.csv";

/// ISO 3166 alpha-3 codes collected by default
pub const DEFAULT_COUNTRIES: [&str; 100] = [
    "USA", "CHN", "JPN", "DEU", "GBR", "FRA", "IND", "ITA", "BRA", "CAN",
    "RUS", "KOR", "AUS", "ESP", "MEX", "IDN", "NLD", "SAU", "CHE", "TUR",
    "TWN", "POL", "SWE", "BEL", "THA", "IRN", "AUT", "NOR", "ARE", "NGA",
    "ISR", "HKG", "SGP", "MYS", "ZAF", "PHL", "DNK", "IRL", "PAK", "COL",
    "CHL", "FIN", "BGD", "EGY", "VNM", "PRT", "CZE", "ROU", "NZL", "PER",
    "IRQ", "QAT", "KAZ", "GRC", "DZA", "HUN", "KWT", "UKR", "MAR", "AGO",
    "PRI", "ECU", "SVK", "LKA", "ETH", "DOM", "KEN", "OMN", "GTM", "VEN",
    "LUX", "BGR", "HRV", "URY", "CRI", "SVN", "LTU", "TZA", "PAN", "LBN",
    "SRB", "UZB", "TUN", "JOR", "AZE", "BLR", "GHA", "MMR", "HND", "BOL",
    "COD", "LVA", "EST", "NPL", "CMR", "CIV", "BHR", "ZWE", "UGA", "SEN",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// API root; requests go to `{base_url}/DataBank/indicator_data`
    pub base_url: String,
    /// Pause after each country, in milliseconds
    pub delay_ms: u64,
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    pub output_dir: PathBuf,
    pub merged_filename: String,
    pub countries: Vec<String>,
    pub indicators: Vec<Indicator>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delay_ms: DEFAULT_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            merged_filename: MERGED_FILENAME.to_string(),
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            indicators: vec![Indicator::gdp_per_capita(), Indicator::population()],
        }
    }
}

impl Config {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn merged_path(&self) -> PathBuf {
        self.output_dir.join(&self.merged_filename)
    }

    pub fn indicator_path(&self, indicator: &Indicator) -> PathBuf {
        self.output_dir.join(indicator.file_name())
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Uppercase and trim country codes, dropping blanks and repeats
    pub fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.countries = self
            .countries
            .iter()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty() && seen.insert(c.clone()))
            .collect();
        self.base_url = self.base_url.trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.countries.is_empty() {
            return Err(ConfigError::Validation(
                "no countries configured".to_string(),
            ));
        }
        if let Some(bad) = self.countries.iter().find(|c| !is_alpha3(c)) {
            return Err(ConfigError::Validation(format!(
                "invalid country code '{}': expected ISO 3166 alpha-3",
                bad
            )));
        }
        if self.indicators.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "at least two indicators are required, got {}",
                self.indicators.len()
            )));
        }
        self.validate_indicators()?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation("base_url is empty".to_string()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation("user_agent is empty".to_string()));
        }
        Ok(())
    }

    fn validate_indicators(&self) -> Result<(), ConfigError> {
        let mut columns = HashSet::new();
        let mut suffixes = HashSet::new();
        for indicator in &self.indicators {
            if indicator.code.trim().is_empty() || indicator.column.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "indicator code and column must not be empty".to_string(),
                ));
            }
            if indicator.suffix.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "indicator {} has an empty suffix",
                    indicator.code
                )));
            }
            if is_reserved_column(&indicator.column) {
                return Err(ConfigError::Validation(format!(
                    "indicator column '{}' clashes with a fixed column",
                    indicator.column
                )));
            }
            if !columns.insert(indicator.column.as_str()) {
                return Err(ConfigError::Validation(
                    "indicator columns must be unique".to_string(),
                ));
            }
            if !suffixes.insert(indicator.suffix.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "indicator suffix '{}' is used twice",
                    indicator.suffix
                )));
            }
        }
        Ok(())
    }

    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.base_url,
            countries = self.countries.len(),
            indicators = self.indicators.len(),
            output_dir = %self.output_dir.display(),
            "Loaded config"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}

/// Fixed table columns, plus the `year_<suffix>` family used by the merged file
fn is_reserved_column(column: &str) -> bool {
    column == COUNTRY_CODE_COLUMN
        || column == COUNTRY_NAME_COLUMN
        || column == YEAR_COLUMN
        || column.starts_with(&format!("{}_", YEAR_COLUMN))
}

fn is_alpha3(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

/// Load the config file if given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Config::from_toml_str(&content)?
        }
        None => Config::default(),
    };
    config.trace_loaded();
    Ok(config)
}
