//! Binary payload transport.

use crate::errors::FetchError;
use async_trait::async_trait;
use tracing::debug;

/// Fetches raw bytes from a URL.
#[async_trait(?Send)]
pub trait PayloadFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// `reqwest`-backed fetcher. Any non-2xx status is an error.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl PayloadFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let request_error = |source: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        debug!("Fetched {} bytes from {url}", body.len());
        Ok(body.to_vec())
    }
}
