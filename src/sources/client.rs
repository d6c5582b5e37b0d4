use std::time::Duration;

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::ScrapingConfig;
use crate::error::{ScoutError, ScoutResult};

/// Shared HTTP client with bounded retries and a jittered courtesy delay
/// between fetches. Non-success statuses are reported as `None` ("no
/// content for this item"), not as errors; the batch carries on.
pub struct FetchClient {
    client: Client,
    config: ScrapingConfig,
}

impl FetchClient {
    pub fn new(config: &ScrapingConfig) -> ScoutResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Accept",
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert("Accept-Language", HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .default_headers(headers)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// GET a URL and return the body text, retrying transport failures and
    /// server errors. `Ok(None)` means the source had nothing for us.
    pub async fn get_text(&self, url: &Url) -> ScoutResult<Option<String>> {
        match self.get_with_retries(url).await? {
            Some(response) => Ok(Some(response.text().await?)),
            None => Ok(None),
        }
    }

    /// GET a URL with query parameters and decode the body as JSON.
    pub async fn get_json(
        &self,
        url: &Url,
        params: &[(&str, &str)],
    ) -> ScoutResult<Option<serde_json::Value>> {
        let url = Url::parse_with_params(url.as_str(), params)
            .map_err(|e| ScoutError::internal(format!("bad query params: {}", e)))?;

        match self.get_with_retries(&url).await? {
            Some(response) => {
                let value = response
                    .json()
                    .await
                    .map_err(|e| ScoutError::parse(format!("invalid JSON from {}: {}", url, e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Sleep the configured courtesy delay, with a little jitter so the
    /// request cadence does not look mechanical.
    pub async fn courtesy_delay(&self) {
        let base = self.config.fetch_delay_ms;
        if base == 0 {
            return;
        }
        let jitter = rand::thread_rng().gen_range(0..=base / 4);
        tokio::time::sleep(Duration::from_millis(base + jitter)).await;
    }

    async fn get_with_retries(&self, url: &Url) -> ScoutResult<Option<reqwest::Response>> {
        let mut last_error: Option<ScoutError> = None;

        for attempt in 1..=self.config.max_retries {
            debug!(%url, attempt, "HTTP GET");

            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(Some(response));
                    }
                    if status.is_server_error() && attempt < self.config.max_retries {
                        warn!(%url, status = status.as_u16(), "server error, retrying");
                        last_error = Some(ScoutError::HttpRequest {
                            url: url.to_string(),
                            status: status.as_u16(),
                        });
                    } else {
                        // Client errors and exhausted server errors are
                        // "no content", never batch-fatal.
                        warn!(%url, status = status.as_u16(), "non-success status, no content");
                        return Ok(None);
                    }
                }
                Err(e) => {
                    warn!(%url, attempt, error = %e, "request failed");
                    last_error = Some(e.into());
                }
            }

            if attempt < self.config.max_retries {
                let backoff = Duration::from_secs(self.config.retry_delay_seconds * attempt as u64);
                tokio::time::sleep(backoff).await;
            }
        }

        Err(last_error.unwrap_or_else(|| ScoutError::network("all retry attempts failed")))
    }
}
