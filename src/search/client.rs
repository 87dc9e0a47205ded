//! Client for the hosted vector database.
//!
//! Issues one read-only `nearText` query per search over the GraphQL
//! endpoint and hands back the nested body untouched.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use super::query::{NearTextQuery, RawResultSet};
use crate::config::{Credentials, WeaviateConfig};

/// Failure of a whole search request.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Failed to reach the search service: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Search service rejected the credentials ({0})")]
    Auth(StatusCode),
    #[error("Search service error ({status}): {body}")]
    Status { status: StatusCode, body: String },
    #[error("Search query failed: {0}")]
    Upstream(String),
    #[error("Failed to parse search response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Semantic search client bound to one collection.
pub struct SearchClient {
    base_url: String,
    api_key: String,
    openai_api_key: String,
    collection: String,
    limit: Option<usize>,
    http: reqwest::Client,
}

impl SearchClient {
    pub fn new(credentials: &Credentials, config: &WeaviateConfig) -> Result<Self, QueryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(QueryError::Network)?;
        Ok(Self {
            base_url: credentials.url.trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
            openai_api_key: credentials.openai_api_key.clone(),
            collection: config.collection.clone(),
            limit: config.limit,
            http,
        })
    }

    /// Run a semantic search for `text`.
    ///
    /// An empty result list is a successful, empty [`RawResultSet`]; only
    /// transport, HTTP and GraphQL failures are errors.
    pub async fn search(&self, text: &str) -> Result<RawResultSet, QueryError> {
        let url = format!("{}/v1/graphql", self.base_url);
        let query = NearTextQuery::new(&self.collection, text, self.limit);
        let started = Instant::now();

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("X-OpenAI-Api-Key", &self.openai_api_key)
            .json(&query.body())
            .send()
            .await
            .map_err(QueryError::Network)?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(QueryError::Auth(status));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(QueryError::Status { status, body });
        }

        let body: Value = resp.json().await.map_err(QueryError::Decode)?;
        let raw = RawResultSet::new(self.collection.clone(), body);

        let errors = raw.errors();
        if !errors.is_empty() && raw.records().is_none() {
            return Err(QueryError::Upstream(errors.join("; ")));
        }
        if !errors.is_empty() {
            tracing::warn!("Search returned partial errors: {}", errors.join("; "));
        }

        let records = raw.records().and_then(Value::as_array).map_or(0, Vec::len);
        tracing::info!(
            collection = %self.collection,
            query_len = text.chars().count(),
            records,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "semantic search complete"
        );

        Ok(raw)
    }

    /// Service root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
