//! HTTP page retrieval.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use pledge_core::models::config::FetchConfig;
use pledge_core::{PageFetcher, RetrievalError};

/// Fetches pages over HTTP(S) with a shared client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, RetrievalError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| classify(url, e))?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn classify(url: &Url, error: reqwest::Error) -> RetrievalError {
    if error.is_timeout() {
        RetrievalError::Timeout {
            url: url.to_string(),
        }
    } else {
        RetrievalError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
