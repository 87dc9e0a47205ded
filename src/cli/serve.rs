use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use super::OutputConfig;
use crate::config::{Config, Credentials};

#[derive(Args)]
pub struct ServeArgs {
    /// HTTP server port (defaults to server.port, 8501)
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServeArgs, config_path: Option<&Path>, _output: OutputConfig) -> Result<()> {
    let config = Config::resolve(config_path).context("Failed to load configuration")?;
    let credentials = Credentials::from_env()?;
    let port = args.port.unwrap_or(config.server.port);

    crate::http::run_server(config, credentials, port).await
}
