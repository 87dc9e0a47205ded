use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::filters::FilterArgs;
use super::output;
use super::OutputConfig;
use crate::config::Config;
use crate::search::RawResultSet;

#[derive(Args)]
pub struct RenderArgs {
    /// Saved search response (the JSON body returned by the service)
    file: PathBuf,

    /// Collection name under data.Get (defaults to weaviate.collection)
    #[arg(long)]
    collection: Option<String>,

    #[command(flatten)]
    filters: FilterArgs,
}

pub async fn run(args: RenderArgs, config_path: Option<&Path>, output: OutputConfig) -> Result<()> {
    let config = Config::resolve(config_path).context("Failed to load configuration")?;

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let body: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", args.file.display()))?;

    let collection = args
        .collection
        .unwrap_or_else(|| config.weaviate.collection.clone());
    let raw = RawResultSet::new(collection, body);

    let label = args
        .file
        .file_name()
        .map_or_else(|| args.file.display().to_string(), |n| n.to_string_lossy().into_owned());

    output::show(&label, &raw, &args.filters, &config, output).await
}
