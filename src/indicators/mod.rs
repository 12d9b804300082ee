// Indicators module - series definitions and latest-value extraction

pub mod client;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const GDP_PER_CAPITA_CODE: &str = "NY.GDP.PCAP.CD";
pub const POPULATION_CODE: &str = "SP.POP.TOTL";

/// An indicator series and how it lands in the CSV tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// API series identifier, e.g. `NY.GDP.PCAP.CD`
    pub code: String,
    /// Value column name in the CSV files
    pub column: String,
    /// Suffix for this indicator's year column in the merged file
    pub suffix: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Indicator {
    pub fn gdp_per_capita() -> Self {
        Self {
            code: GDP_PER_CAPITA_CODE.to_string(),
            column: "gdp_per_capita".to_string(),
            suffix: "gdp".to_string(),
            label: Some("GDP per capita (current US$)".to_string()),
        }
    }

    pub fn population() -> Self {
        Self {
            code: POPULATION_CODE.to_string(),
            column: "population".to_string(),
            suffix: "pop".to_string(),
            label: Some("Population, total".to_string()),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.column)
    }

    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.code)
    }
}

/// DataBank `indicator_data` response body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndicatorResponse {
    #[serde(rename = "countryName")]
    pub country_name: Option<String>,
    /// Year key -> value, null when the year has no observation
    #[serde(default)]
    pub data: Option<BTreeMap<String, Option<f64>>>,
}

/// A single year/value pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub year: i32,
    pub value: f64,
}

/// Latest observation for one country and one indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRecord {
    pub country_code: String,
    pub country_name: String,
    pub year: i32,
    pub value: f64,
}

impl IndicatorResponse {
    /// Most recent year whose value is non-null.
    ///
    /// Year keys that are not integers are ignored.
    pub fn latest_observation(&self) -> Option<Observation> {
        let data = self.data.as_ref()?;
        data.iter()
            .filter_map(|(key, value)| {
                let year = match key.trim().parse::<i32>() {
                    Ok(year) => year,
                    Err(_) => {
                        debug!("Ignoring non-numeric year key '{}'", key);
                        return None;
                    }
                };
                value.map(|value| Observation { year, value })
            })
            .max_by_key(|obs| obs.year)
    }

    /// Flatten into a record, or `None` when there is nothing to keep
    pub fn to_record(&self, country_code: &str) -> Option<IndicatorRecord> {
        let country_name = self.country_name.as_ref()?;
        let latest = self.latest_observation()?;
        Some(IndicatorRecord {
            country_code: country_code.to_string(),
            country_name: country_name.clone(),
            year: latest.year,
            value: latest.value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> IndicatorResponse {
        serde_json::from_str(json).expect("valid response json")
    }

    #[test]
    fn test_latest_picks_max_non_null_year() {
        let response = parse(
            r#"{"countryName": "France",
                "data": {"2021": 43659.0, "2022": 40886.25, "2023": null, "2024": null}}"#,
        );
        assert_eq!(
            response.latest_observation(),
            Some(Observation {
                year: 2022,
                value: 40886.25
            })
        );
    }

    #[test]
    fn test_latest_is_independent_of_key_order() {
        let response = parse(r#"{"countryName": "Japan", "data": {"2023": 1.0, "1999": 2.0, "2010": 3.0}}"#);
        assert_eq!(response.latest_observation().map(|o| o.year), Some(2023));
    }

    #[test]
    fn test_latest_ignores_non_numeric_keys() {
        let response = parse(r#"{"countryName": "Chile", "data": {"latest": 9.0, "2019": 5.0}}"#);
        assert_eq!(
            response.latest_observation(),
            Some(Observation {
                year: 2019,
                value: 5.0
            })
        );
    }

    #[test]
    fn test_zero_is_a_value() {
        let response = parse(r#"{"countryName": "Nowhere", "data": {"2020": 3.0, "2021": 0}}"#);
        assert_eq!(response.latest_observation().map(|o| o.year), Some(2021));
    }

    #[test]
    fn test_all_null_yields_nothing() {
        let response = parse(r#"{"countryName": "Taiwan", "data": {"2022": null, "2023": null}}"#);
        assert_eq!(response.latest_observation(), None);
        assert_eq!(response.to_record("TWN"), None);
    }

    #[test]
    fn test_missing_data_yields_nothing() {
        let response = parse(r#"{"countryName": "Taiwan"}"#);
        assert_eq!(response.latest_observation(), None);
    }

    #[test]
    fn test_record_requires_country_name() {
        let response = parse(r#"{"data": {"2023": 1.5}}"#);
        assert_eq!(response.to_record("XXX"), None);
    }

    #[test]
    fn test_to_record() {
        let response = parse(r#"{"countryName": "Germany", "data": {"2023": 84482267}}"#);
        assert_eq!(
            response.to_record("DEU"),
            Some(IndicatorRecord {
                country_code: "DEU".to_string(),
                country_name: "Germany".to_string(),
                year: 2023,
                value: 84482267.0,
            })
        );
    }

    #[test]
    fn test_builtin_indicators() {
        assert_eq!(Indicator::gdp_per_capita().file_name(), "gdp_per_capita.csv");
        assert_eq!(Indicator::population().code, "SP.POP.TOTL");
        let unlabeled = Indicator {
            label: None,
            ..Indicator::population()
        };
        assert_eq!(unlabeled.display_name(), "SP.POP.TOTL");
    }
}
