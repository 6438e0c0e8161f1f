use std::time::Duration;

use reqwest::StatusCode;

const HEAD_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Thin helpers over a shared [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct HttpHelper {
    client: reqwest::Client,
}

impl HttpHelper {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GETs `url` and parses the body as JSON. Non-2xx statuses are errors.
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let value = self.client.get(url).send().await?.error_for_status()?.json().await?;
        Ok(value)
    }

    /// True only when a HEAD request answers 200. Transport failures count as
    /// unreachable.
    pub async fn url_exists(&self, url: &str) -> bool {
        match self.client.head(url).timeout(HEAD_TIMEOUT).send().await {
            Ok(resp) => resp.status() == StatusCode::OK,
            Err(err) => {
                tracing::debug!(%url, error = %err, "head request failed");
                false
            }
        }
    }

    pub async fn get_status_code(&self, url: &str) -> Result<u16, FetchError> {
        Ok(self.client.get(url).send().await?.status().as_u16())
    }
}
