//! Library-level pipeline tests: HTTP client -> collector -> merge -> CSV

use country_indicators::collector::collect;
use country_indicators::config::Config;
use country_indicators::error::MergeError;
use country_indicators::indicators::client::DataBankClient;
use country_indicators::merge::merge_datasets;
use country_indicators::output::{write_indicator_csv, write_merged_csv};
use country_indicators::reports::{load_merged_csv, rank_by};
use mockito::Matcher;
use std::time::Duration;

async fn mock(
    server: &mut mockito::ServerGuard,
    indicator: &str,
    country: &str,
    body: &str,
) -> mockito::Mock {
    server
        .mock("GET", "/DataBank/indicator_data")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("indicator".into(), indicator.into()),
            Matcher::UrlEncoded("country".into(), country.into()),
        ]))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await
}

fn config_for(server: &mockito::ServerGuard, countries: &[&str], out: &std::path::Path) -> Config {
    let mut config = Config {
        base_url: server.url(),
        delay_ms: 0,
        output_dir: out.to_path_buf(),
        countries: countries.iter().map(|c| c.to_string()).collect(),
        ..Config::default()
    };
    config.normalize();
    config.validate().expect("valid test config");
    config
}

#[tokio::test]
async fn test_pipeline_round_trip_through_files() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = vec![
        mock(&mut server, "NY.GDP.PCAP.CD", "NOR", r#"{"countryName": "Norway", "data": {"2023": 87961.8, "2024": null}}"#).await,
        mock(&mut server, "SP.POP.TOTL", "NOR", r#"{"countryName": "Norway", "data": {"2023": 5519594}}"#).await,
        mock(&mut server, "NY.GDP.PCAP.CD", "NGA", r#"{"countryName": "Nigeria", "data": {"2022": 2162.6, "2023": 1621.1}}"#).await,
        mock(&mut server, "SP.POP.TOTL", "NGA", r#"{"countryName": "Nigeria", "data": {"2023": 223804632}}"#).await,
    ];

    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_for(&server, &["NOR", "NGA"], dir.path());
    let client = DataBankClient::new(&config.base_url, &config.user_agent, config.timeout()).expect("client");

    let collection = collect(
        &client,
        &config.countries,
        &config.indicators,
        Duration::ZERO,
        None,
    )
    .await;
    assert!(collection.failures.is_empty());

    for dataset in &collection.datasets {
        write_indicator_csv(&config.indicator_path(&dataset.indicator), dataset).expect("write");
    }
    let merged = merge_datasets(&collection.datasets).expect("merge");
    write_merged_csv(&config.merged_path(), &config.indicators, &merged).expect("write merged");

    let rows = load_merged_csv(config.merged_path()).expect("read merged");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].values.get("gdp_per_capita"), Some(&1621.1));

    let populous = rank_by(&rows, "population", 1);
    assert_eq!(populous.entries[0].country_code, "NGA");
}

#[tokio::test]
async fn test_unreachable_api_yields_empty_datasets() {
    let server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_for(&server, &["USA", "CHN"], dir.path());
    let client = DataBankClient::new(&config.base_url, &config.user_agent, config.timeout()).expect("client");

    let collection = collect(
        &client,
        &config.countries,
        &config.indicators,
        Duration::ZERO,
        None,
    )
    .await;

    assert_eq!(collection.failures.len(), 4);
    assert!(collection.datasets.iter().all(|d| d.is_empty()));
    assert_eq!(
        merge_datasets(&collection.datasets),
        Err(MergeError::EmptyDataset)
    );
}
