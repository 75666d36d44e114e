//! Zscaler range feed client.
//!
//! Zscaler publishes the egress ranges of its cloud as a JSON document with a
//! `prefixes` array. The document is fetched once per run, without retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{FeedError, Result};

use super::range_set::RangeSet;
use super::source::RangeSource;

/// Location of the Zscaler "future" range feed.
pub const ZSCALER_FEED_URL: &str = "https://config.zscaler.com/api/zscaler.net/future/json";

/// Request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Feed document layout.
#[derive(Debug, Deserialize)]
struct FeedDocument {
    prefixes: Vec<String>,
}

/// Client for the Zscaler range feed.
#[derive(Debug, Clone)]
pub struct ZscalerFeed {
    /// HTTP client.
    client: Client,
    /// Feed location.
    url: String,
}

impl ZscalerFeed {
    /// Creates a client for the public Zscaler feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_endpoint(ZSCALER_FEED_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client for a feed at another location.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_endpoint(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            FeedError::Transport {
                url: url.clone(),
                message: format!("Failed to create HTTP client: {e}"),
            }
        })?;

        Ok(Self { client, url })
    }

    /// Returns the feed location.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parses a feed document body.
    fn parse_document(body: &str) -> Result<RangeSet> {
        let document: FeedDocument =
            serde_json::from_str(body).map_err(|e| FeedError::parse(e.to_string()))?;
        Ok(RangeSet::new(document.prefixes))
    }
}

#[async_trait]
impl RangeSource for ZscalerFeed {
    async fn fetch(&self) -> Result<RangeSet> {
        info!("Fetching IP addresses from {}...", self.url);

        let transport = |e: reqwest::Error| FeedError::Transport {
            url: self.url.clone(),
            message: e.to_string(),
        };

        let response = self.client.get(&self.url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(transport)?;
        debug!("Feed document is {} bytes", body.len());

        let ranges = Self::parse_document(&body)?;
        info!("Successfully fetched {} IP ranges from Zscaler", ranges.len());
        Ok(ranges)
    }
}
