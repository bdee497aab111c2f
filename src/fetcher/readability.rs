//! Client for the Readability-style content-extraction API
//!
//! The service is queried with `GET <endpoint>?token=<token>&url=<url>` and
//! answers with a JSON object carrying at least `title` and `content`.

use crate::cache::CachedArticle;
use crate::config::ExtractionConfig;
use crate::fetcher::ArticleFetcher;
use crate::sanitize::Sanitizer;
use crate::{AutomobileError, ConfigError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// The part of the extraction response the pipeline relies on
#[derive(Debug, Deserialize)]
struct ParserResponse {
    title: String,
    content: String,
}

/// Builds the HTTP client used for extraction requests
///
/// No timeout is applied unless `timeout-secs` is configured.
pub fn build_http_client(config: &ExtractionConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("automobile/{}", env!("CARGO_PKG_VERSION"));

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetcher backed by the extraction API
#[derive(Debug, Clone)]
pub struct ReadabilityFetcher {
    client: Client,
    endpoint: Url,
    token: String,
    sanitizer: Sanitizer,
}

impl ReadabilityFetcher {
    /// Creates a fetcher from the extraction settings
    ///
    /// The token is only checked on the first fetch, so a run served
    /// entirely from the cache works without one.
    ///
    /// # Returns
    ///
    /// * `Ok(ReadabilityFetcher)` - Ready to fetch
    /// * `Err(AutomobileError::Config)` - Invalid endpoint
    /// * `Err(AutomobileError::Http)` - The HTTP client could not be built
    pub fn new(config: &ExtractionConfig, sanitizer: Sanitizer) -> crate::Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint: {}", e)))?;

        let client = build_http_client(config).map_err(|source| AutomobileError::Http {
            url: config.endpoint.clone(),
            source,
        })?;

        Ok(Self {
            client,
            endpoint,
            token: config.token.clone(),
            sanitizer,
        })
    }
}

#[async_trait]
impl ArticleFetcher for ReadabilityFetcher {
    async fn fetch(&self, url: &str) -> crate::Result<CachedArticle> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "an extraction API token is required (set [extraction] token or pass --token)"
                    .to_string(),
            )
            .into());
        }

        let http_err = |source: reqwest::Error| AutomobileError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("token", self.token.as_str()), ("url", url)])
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AutomobileError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_err)?;
        let parsed: ParserResponse =
            serde_json::from_str(&body).map_err(|e| AutomobileError::InvalidResponse {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let html = self.sanitizer.sanitize(parsed.content.trim())?;
        let title = match parsed.title.trim() {
            "" => {
                tracing::warn!("Extraction returned no title for {}, using the URL", url);
                url.to_string()
            }
            title => title.to_string(),
        };

        Ok(CachedArticle::new(title, html))
    }
}
