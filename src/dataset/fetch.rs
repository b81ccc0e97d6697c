// Source fetcher trait — the swap-ready I/O seam.
//
// The loader only needs raw bytes for a DataSource. The default fetcher reads
// local files and does a single HTTP GET for URLs; tests substitute an
// in-memory fetcher. No retries, no backoff: one attempt, error surfaced.

use anyhow::Context;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::source::DataSource;
use crate::error::LoadError;

/// Trait for retrieving the raw bytes behind a data source reference.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, source: &DataSource) -> Result<Vec<u8>, LoadError>;
}

/// Filesystem + HTTP fetcher used by the CLI and web server.
pub struct DefaultFetcher {
    client: reqwest::Client,
    show_progress: bool,
}

impl DefaultFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("sentiboard/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            show_progress: false,
        })
    }

    /// Show a terminal spinner while a remote download is in flight.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        debug!(url = url, "GET data source");

        let spinner = self.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("    {spinner} {msg}") {
                pb.set_style(style);
            }
            pb.set_message(format!("Fetching {url}"));
            pb.enable_steady_tick(std::time::Duration::from_millis(120));
            pb
        });

        let result = self.download(url).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        result
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Unreachable {
                source_ref: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(LoadError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| LoadError::Unreachable {
            source_ref: url.to_string(),
            reason: format!("failed to read response body: {e}"),
        })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SourceFetcher for DefaultFetcher {
    async fn fetch(&self, source: &DataSource) -> Result<Vec<u8>, LoadError> {
        let bytes = match source {
            DataSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|e| LoadError::Unreachable {
                        source_ref: path.display().to_string(),
                        reason: e.to_string(),
                    })?
            }
            DataSource::Url(url) => self.fetch_url(url).await?,
        };

        info!(source = %source, bytes = bytes.len(), "Fetched data source");
        Ok(bytes)
    }
}
