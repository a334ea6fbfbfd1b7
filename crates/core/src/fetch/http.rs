//! reqwest-backed resource fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::config::FetchConfig;

use super::{FetchError, ResourceFetcher, ResourceInfo, ResourceStream};

/// HTTP implementation of [`ResourceFetcher`].
///
/// Bounded connect and read timeouts replace the original's hang-forever
/// behavior; a stalled transfer surfaces as [`FetchError::Timeout`].
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn check_status(path: &str, response: &Response) -> Result<(), FetchError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Http(format!("HTTP {} for {}", status, path)));
        }
        Ok(())
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::ConnectionFailed(e.to_string())
    } else {
        FetchError::Http(e.to_string())
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn probe(&self, path: &str) -> Result<ResourceInfo, FetchError> {
        let url = self.url(path);
        debug!(url = %url, "probing resource");

        let response = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::check_status(path, &response)?;

        Ok(ResourceInfo {
            path: path.to_string(),
            content_length: response.content_length(),
        })
    }

    async fn fetch(&self, path: &str) -> Result<Box<dyn ResourceStream>, FetchError> {
        let url = self.url(path);
        debug!(url = %url, "fetching resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::check_status(path, &response)?;

        Ok(Box::new(HttpStream { response }))
    }
}

struct HttpStream {
    response: Response,
}

#[async_trait]
impl ResourceStream for HttpStream {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, FetchError> {
        self.response
            .chunk()
            .await
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .map_err(map_reqwest_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let fetcher = HttpFetcher::new(FetchConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..FetchConfig::default()
        });
        assert_eq!(
            fetcher.url("/Scryfall/default-cards.json"),
            "http://localhost:8080/Scryfall/default-cards.json"
        );
        assert_eq!(fetcher.url("plain.json"), "http://localhost:8080/plain.json");
    }
}
