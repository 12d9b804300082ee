use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use country_indicators::collector::{collect, CollectProgress};
use country_indicators::config::{load_config, Config};
use country_indicators::error::MergeError;
use country_indicators::indicators::client::DataBankClient;
use country_indicators::merge::merge_datasets;
use country_indicators::output::{write_indicator_csv, write_merged_csv};

use crate::cli::formatters::{self, CollectSummary, DatasetSummary, FailureSummary};
use crate::cli::CollectArgs;

/// Layer command-line overrides on top of the loaded config
pub fn resolve_config(args: &CollectArgs) -> Result<Config> {
    let mut config = load_config(args.config.as_deref()).context("Failed to load config")?;

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(delay) = args.delay_ms {
        config.delay_ms = delay;
    }
    if !args.countries.is_empty() {
        config.countries = args.countries.clone();
    }

    config.normalize();
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub async fn dispatch_collect(args: CollectArgs, json_output: bool) -> Result<()> {
    let config = resolve_config(&args)?;
    tracing::info!(
        "Collecting {} countries from {}",
        config.countries.len(),
        config.base_url
    );

    let client = DataBankClient::new(&config.base_url, &config.user_agent, config.timeout())
        .context("Failed to build HTTP client")?;

    let callback = |progress: &CollectProgress| {
        if json_output {
            return;
        }
        match progress {
            CollectProgress::Country {
                index,
                total,
                country_code,
            } => println!("Processing {}/{}: {}", index, total, country_code),
            CollectProgress::Failed(failure) => println!(
                "{} Error getting data for {}, {}: {}",
                "✗".red(),
                failure.country_code,
                failure.indicator_code,
                failure.message
            ),
            CollectProgress::NoData { .. } => {}
        }
    };

    let cb_ref: &dyn Fn(&CollectProgress) = &callback;

    let collection = collect(
        &client,
        &config.countries,
        &config.indicators,
        config.delay(),
        Some(cb_ref),
    )
    .await;

    let mut datasets = Vec::with_capacity(collection.datasets.len());
    for dataset in &collection.datasets {
        let path = config.indicator_path(&dataset.indicator);
        write_indicator_csv(&path, dataset)?;
        datasets.push(DatasetSummary {
            indicator: dataset.indicator.code.clone(),
            label: dataset.indicator.display_name().to_string(),
            column: dataset.indicator.column.clone(),
            rows: dataset.len(),
            path: path.display().to_string(),
        });
    }

    let mut summary = CollectSummary {
        countries_requested: config.countries.len(),
        datasets,
        failures: collection
            .failures
            .iter()
            .map(|f| FailureSummary {
                country_code: f.country_code.clone(),
                indicator_code: f.indicator_code.clone(),
                message: f.message.clone(),
            })
            .collect(),
        merged_rows: None,
        merged_path: None,
        error: None,
        finished_at: Utc::now(),
    };

    let outcome = match merge_datasets(&collection.datasets) {
        Ok(rows) => {
            let path = config.merged_path();
            write_merged_csv(&path, &config.indicators, &rows)?;
            summary.merged_rows = Some(rows.len());
            summary.merged_path = Some(path.display().to_string());
            Ok(rows.len())
        }
        Err(e @ MergeError::EmptyDataset) => {
            summary.error = Some(e.to_string());
            Err(e)
        }
        Err(e) => return Err(e.into()),
    };

    if json_output {
        println!("{}", formatters::format_collect_json(&summary));
    } else {
        print!("{}", formatters::format_collect_table(&summary));
    }

    match outcome {
        Ok(count) => {
            if !json_output {
                println!("Saved data for {} countries", count);
            }
            Ok(())
        }
        // Bubbles up to main, which prints "Error: ..." and exits non-zero
        Err(e) => Err(e.into()),
    }
}
