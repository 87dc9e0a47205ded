use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::filters::FilterArgs;
use super::output::{self, print_status};
use super::OutputConfig;
use crate::config::{Config, Credentials};
use crate::search::{check_query, SearchClient};

#[derive(Args)]
pub struct SearchArgs {
    /// What you're craving (1-50 characters)
    #[arg(value_parser = parse_query)]
    query: String,

    #[command(flatten)]
    filters: FilterArgs,
}

fn parse_query(s: &str) -> Result<String, String> {
    check_query(s).map(|()| s.to_string())
}

pub async fn run(args: SearchArgs, config_path: Option<&Path>, output: OutputConfig) -> Result<()> {
    let config = Config::resolve(config_path).context("Failed to load configuration")?;
    let credentials = Credentials::from_env()?;
    let client = SearchClient::new(&credentials, &config.weaviate)
        .context("Failed to build search client")?;

    let raw = match client.search(&args.query).await {
        Ok(raw) => raw,
        Err(e) => {
            if output.json {
                print_status("error", e.to_string())?;
            } else if !output.quiet {
                println!("{} {}", "✗".red(), e);
            }
            return Err(e).context("Search failed");
        }
    };

    output::show(&args.query, &raw, &args.filters, &config, output).await
}
