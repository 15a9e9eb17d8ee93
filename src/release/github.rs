//! GitHub releases API client.

use super::{ReleaseGateway, ReleaseManifest};
use crate::error::KzError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("kz/", env!("CARGO_PKG_VERSION"));

fn build_release_http_client(timeout: Duration) -> Result<Client, KzError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(|e| KzError::Gateway(format!("Failed to create HTTP client: {}", e)))
}

fn map_http_error(url: &str, error: reqwest::Error) -> KzError {
    if error.is_timeout() {
        KzError::Gateway(format!("request to {} timed out: {}", url, error))
    } else if error.is_connect() {
        KzError::Gateway(format!("failed to connect to {}: {}", url, error))
    } else {
        KzError::Gateway(format!("failed to make GET request to {}: {}", url, error))
    }
}

/// Release gateway backed by `GET /repos/{owner}/{repo}/releases/latest`.
pub struct GithubGateway {
    client: Client,
    api_base_url: String,
    repository: String,
}

impl GithubGateway {
    pub fn new(
        api_base_url: impl Into<String>,
        repository: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, KzError> {
        Ok(Self {
            client: build_release_http_client(timeout)?,
            api_base_url: api_base_url.into(),
            repository: repository.into(),
        })
    }

    /// Use a preconfigured HTTP client, e.g. one without proxy settings.
    pub fn with_client(
        client: Client,
        api_base_url: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
            repository: repository.into(),
        }
    }

    fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/releases/latest",
            self.api_base_url.trim_end_matches('/'),
            self.repository
        )
    }

    async fn get(&self, url: &str, accept: &str) -> Result<Vec<u8>, KzError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| map_http_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KzError::Gateway(format!(
                "failed to make GET request to {}, status code {}",
                url,
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| KzError::Gateway(format!("failed to read response body: {}", e)))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ReleaseGateway for GithubGateway {
    async fn latest_release(&self) -> Result<ReleaseManifest, KzError> {
        let url = self.latest_release_url();
        let body = self.get(&url, "application/vnd.github+json").await?;
        serde_json::from_slice(&body)
            .map_err(|e| KzError::Gateway(format!("failed to decode response body: {}", e)))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, KzError> {
        self.get(url, "application/octet-stream").await
    }
}
