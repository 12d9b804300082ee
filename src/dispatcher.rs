//! Command dispatcher that routes parsed CLI commands to their handlers.

mod collect;
mod report;

use crate::cli::{formatters, Commands};
use anyhow::Result;
use country_indicators::config::load_config;
use tracing::info;

/// Route a parsed command to its handler
pub async fn dispatch_command(command: Commands, json_output: bool) -> Result<()> {
    match command {
        Commands::Collect(args) => collect::dispatch_collect(args, json_output).await,
        Commands::Countries { config } => {
            info!("Listing configured countries");
            let config = load_config(config.as_deref())?;
            if json_output {
                println!("{}", formatters::format_countries_json(&config.countries));
            } else {
                print!("{}", formatters::format_countries_text(&config.countries));
            }
            Ok(())
        }
        Commands::Report(args) => report::dispatch_report(args, json_output),
    }
}
