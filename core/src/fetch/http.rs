use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::{FetchError, SourceFetcher};

const USER_AGENT: &str = concat!("uncdn/", env!("CARGO_PKG_VERSION"));

/// Plain `GET` over `reqwest`, bounded by a per-request timeout. No retries.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| classify(url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| match classify(url, e) {
            FetchError::Request { url, source } => FetchError::Body {
                url,
                reason: source.to_string(),
            },
            other => other,
        })
    }
}

fn classify(url: &str, source: reqwest::Error) -> FetchError {
    if source.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            source,
        }
    }
}
