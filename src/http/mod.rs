//! HTTP UI for Crispy.
//!
//! Serves a server-rendered search page and a JSON endpoint. Every request
//! is evaluated from scratch: query, flatten, filter, lay out, fetch images.

mod handlers;
mod page;
mod params;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::{Config, Credentials};
use crate::image::ImageFetcher;
use crate::search::SearchClient;

/// Shared application state for HTTP handlers. Immutable after startup.
pub struct AppState {
    pub config: Config,
    pub client: SearchClient,
    pub images: ImageFetcher,
}

impl AppState {
    pub fn new(config: Config, credentials: &Credentials) -> Result<Self> {
        let client = SearchClient::new(credentials, &config.weaviate)
            .context("Failed to build search client")?;
        let images = ImageFetcher::new(
            Duration::from_secs(config.display.image_timeout_secs),
            config.display.max_image_bytes,
        )
        .context("Failed to build image client")?;
        Ok(Self {
            config,
            client,
            images,
        })
    }
}

/// Run the HTTP server on the given port
pub async fn run_server(config: Config, credentials: Credentials, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(config, &credentials)?);
    tracing::info!(
        "Searching collection {} at {}",
        state.config.weaviate.collection,
        state.client.base_url()
    );
    let app = handlers::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Crispy UI listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
