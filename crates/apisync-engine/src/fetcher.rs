//! Remote schema fetching
//!
//! An origin document already is a serialized [`DataSource`]; fetching reads
//! it, renames it to the configured name and canonicalizes it.

#![allow(clippy::result_large_err)]

use apisync_core::model::DataSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::DataSourceConfig;
use crate::errors::{fetch_error, Result};

const FETCH_TIMEOUT_SECS: u64 = 30;

#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// Fetch the current remote schema of one configured origin.
    ///
    /// # Errors
    /// `Fetch` when the origin is unreachable or its document is invalid.
    async fn fetch(&self, config: &DataSourceConfig) -> Result<DataSource>;
}

/// Reads origins from local files or over HTTP(S)
#[derive(Debug, Clone)]
pub struct OriginFetcher {
    client: reqwest::Client,
    base_dir: PathBuf,
}

impl OriginFetcher {
    /// Relative file origins resolve against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_dir: base_dir.into(),
        }
    }

    fn resolve_path(&self, url: &str) -> PathBuf {
        let raw = Path::new(url.strip_prefix("file://").unwrap_or(url));
        if raw.is_relative() {
            self.base_dir.join(raw)
        } else {
            raw.to_path_buf()
        }
    }

    async fn read_file(&self, config: &DataSourceConfig) -> Result<String> {
        let path = self.resolve_path(&config.url);
        tracing::debug!(data_source = %config.name, path = %path.display(), "reading schema file");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| fetch_error(&config.name, format!("cannot read {}: {}", path.display(), e)))
    }

    async fn read_http(&self, config: &DataSourceConfig) -> Result<String> {
        tracing::debug!(data_source = %config.name, url = %config.url, "fetching schema");
        let mut request = self
            .client
            .get(&config.url)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS));
        if let Some(token) = &config.token {
            request = request.bearer_auth(token.expose());
        }

        let response = request
            .send()
            .await
            .map_err(|e| fetch_error(&config.name, format!("request to {} failed: {}", config.url, e)))?
            .error_for_status()
            .map_err(|e| fetch_error(&config.name, format!("{} returned error: {}", config.url, e)))?;

        response
            .text()
            .await
            .map_err(|e| fetch_error(&config.name, format!("cannot read body of {}: {}", config.url, e)))
    }
}

fn is_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Parse an origin document into the configured, canonical data source
pub fn parse_origin(config: &DataSourceConfig, content: &str) -> Result<DataSource> {
    let mut ds: DataSource = serde_json::from_str(content)
        .map_err(|e| fetch_error(&config.name, format!("invalid schema document: {}", e)))?;
    ds.name = config.name.clone();
    ds.canonicalize();
    Ok(ds)
}

#[async_trait]
impl RemoteFetcher for OriginFetcher {
    async fn fetch(&self, config: &DataSourceConfig) -> Result<DataSource> {
        let content = if is_http(&config.url) {
            self.read_http(config).await?
        } else {
            self.read_file(config).await?
        };
        parse_origin(config, &content)
    }
}
