use anyhow::Result;
use country_indicators::reports::{filter_min, load_merged_csv, rank_by, Ranking};
use tracing::info;

use crate::cli::formatters;
use crate::cli::ReportArgs;

const POPULATION_COLUMN: &str = "population";

pub fn dispatch_report(args: ReportArgs, json_output: bool) -> Result<()> {
    info!("Building rankings from {}", args.file.display());
    let rows = load_merged_csv(&args.file)?;

    let candidates = match args.min_population {
        Some(min) => filter_min(&rows, POPULATION_COLUMN, min),
        None => rows.iter().collect(),
    };

    let rankings: Vec<Ranking> = args
        .by
        .iter()
        .map(|column| rank_by(candidates.iter().copied(), column, args.top))
        .collect();

    if json_output {
        println!("{}", formatters::format_rankings_json(&rankings));
    } else {
        print!("{}", formatters::format_rankings_table(&rankings));
    }
    Ok(())
}
