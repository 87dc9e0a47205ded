use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod http;
mod image;
mod results;
mod search;
mod types;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    config::load_env()?;

    let cli = Cli::parse();
    cli.run().await
}
