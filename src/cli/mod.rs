mod filters;
mod output;
mod render;
mod search;
mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crispy")]
#[command(about = "Semantic dish search with filterable result cards")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Show every card detail
    #[arg(long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./crispy.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for dishes and show them as cards
    Search(search::SearchArgs),

    /// Show cards from a saved search response, no credentials needed
    Render(render::RenderArgs),

    /// Run the web UI
    Serve(serve::ServeArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let output = OutputConfig {
            json: self.json,
            quiet: self.quiet,
            verbose: self.verbose,
        };
        let config = self.config.as_deref();

        match self.command {
            Commands::Search(args) => search::run(args, config, output).await,
            Commands::Render(args) => render::run(args, config, output).await,
            Commands::Serve(args) => serve::run(args, config, output).await,
        }
    }
}

/// Output configuration passed to all commands
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}
