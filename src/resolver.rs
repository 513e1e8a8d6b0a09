//! Page fetching with redirect following
//!
//! The extractor only needs one capability from the outside world: fetch a
//! URL, follow redirects, and hand back the final URL plus the body. Hosts
//! inject their own implementation through [`PageResolver`]; [`HttpResolver`]
//! is the default one built on `reqwest`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, redirect};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::ResolverConfig;
use crate::{CoordLinkError, Result};

/// Result of fetching a page after all redirects were followed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPage {
    /// URL after redirects
    #[serde(rename = "finalUrl")]
    pub final_url: String,
    /// Full response body as text
    #[serde(rename = "html")]
    pub body: String,
    /// HTTP status of the final response
    #[serde(rename = "status")]
    pub status_code: u16,
}

/// The "fetch-and-follow" capability consumed by the async extraction path
#[async_trait]
pub trait PageResolver: Send + Sync {
    /// Fetch `url`, following redirects transparently.
    async fn resolve(&self, url: &str) -> Result<ResolvedPage>;

    /// Expand a shortened link to its destination.
    ///
    /// Returns `None` when the fetch fails or no redirect took place.
    async fn expand(&self, url: &str) -> Option<String> {
        match self.resolve(url).await {
            Ok(page) if page.final_url != url => Some(page.final_url),
            Ok(_) => {
                debug!("Link did not redirect: {}", url);
                None
            }
            Err(e) => {
                warn!("Failed to expand link {}: {}", url, e);
                None
            }
        }
    }

    /// Fetch only the body of `url`, or `None` on failure.
    async fn fetch_body(&self, url: &str) -> Option<String> {
        match self.resolve(url).await {
            Ok(page) => Some(page.body),
            Err(e) => {
                warn!("Failed to fetch page {}: {}", url, e);
                None
            }
        }
    }
}

/// `reqwest`-backed resolver
pub struct HttpResolver {
    client: Client,
}

impl HttpResolver {
    /// Create a new resolver from configuration
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .redirect(redirect::Policy::limited(config.max_redirects as usize))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CoordLinkError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageResolver for HttpResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, url: &str) -> Result<ResolvedPage> {
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoordLinkError::network(format!("Request to {url} failed: {e}")))?;

        let final_url = response.url().to_string();
        let status_code = response.status().as_u16();

        if !response.status().is_success() {
            warn!("Page responded with HTTP {}", status_code);
        }

        let body = response
            .text()
            .await
            .map_err(|e| CoordLinkError::network(format!("Failed to read body of {url}: {e}")))?;

        info!(
            "Resolved {} -> {} (HTTP {}, {} bytes) in {:.3}s",
            url,
            final_url,
            status_code,
            body.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(ResolvedPage {
            final_url,
            body,
            status_code,
        })
    }
}
