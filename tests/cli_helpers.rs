#![allow(dead_code)]

use assert_cmd::cargo;
use mockito::{Matcher, Mock, ServerGuard};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const GDP: &str = "NY.GDP.PCAP.CD";
pub const POP: &str = "SP.POP.TOTL";

/// Register a canned `indicator_data` response for one (indicator, country)
pub fn mock_indicator(server: &mut ServerGuard, indicator: &str, country: &str, body: &str) -> Mock {
    server
        .mock("GET", "/DataBank/indicator_data")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("indicator".into(), indicator.into()),
            Matcher::UrlEncoded("country".into(), country.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

pub fn series(country_name: &str, points: &[(&str, Option<f64>)]) -> String {
    let data: serde_json::Map<String, serde_json::Value> = points
        .iter()
        .map(|(year, value)| {
            let v = match value {
                Some(v) => serde_json::json!(v),
                None => serde_json::Value::Null,
            };
            (year.to_string(), v)
        })
        .collect();
    serde_json::json!({ "countryName": country_name, "data": data }).to_string()
}

pub fn output_dir(home: &TempDir) -> PathBuf {
    home.path().join("data")
}

/// Binary with logging quiet, colors off, no inter-request delay, and the
/// API pointed at `base_url`
pub fn base_cmd(home: &TempDir, base_url: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("country-indicators"));
    cmd.current_dir(home.path());
    cmd.env_remove("RUST_LOG");
    cmd.env("COUNTRY_INDICATORS_BASE_URL", base_url);
    cmd.arg("--no-color");
    cmd
}

pub fn collect_cmd(home: &TempDir, base_url: &str, countries: &[&str]) -> Command {
    let mut cmd = base_cmd(home, base_url);
    cmd.arg("collect").arg("--delay-ms").arg("0");
    for c in countries {
        cmd.arg("--country").arg(c);
    }
    cmd
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
        .lines()
        .map(str::to_string)
        .collect()
}
