use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, RETRY_AFTER};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{EngineError, Result};

// ─── RateLimitedClient ────────────────────────────────────────────────────────

/// Shared HTTP client for the search index and the registry.
///
/// Requests are spaced by at least `min_interval`. Transport failures are
/// retried with exponential backoff and `429` responses honour `Retry-After`,
/// both up to `max_retries` times.
pub struct RateLimitedClient {
    client: reqwest::Client,
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
    max_retries: u32,
}

impl RateLimitedClient {
    pub fn new(min_interval: Duration, max_retries: u32, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            min_interval,
            last_request: Arc::new(Mutex::new(None)),
            max_retries,
        })
    }

    async fn wait_for_rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(t) = *last {
            let elapsed = t.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// GET `url`; `Ok(None)` on `404 Not Found`.
    pub async fn get_optional(&self, url: &str) -> Result<Option<String>> {
        let mut attempt = 0u32;
        loop {
            self.wait_for_rate_limit().await;
            debug!(url, attempt, "GET");
            let resp = self
                .client
                .get(url)
                .header(ACCEPT, "application/json")
                .send()
                .await;
            match resp {
                Ok(r) if r.status() == StatusCode::NOT_FOUND => return Ok(None),
                Ok(r) if r.status() == StatusCode::TOO_MANY_REQUESTS => {
                    let wait = r
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    if attempt >= self.max_retries {
                        return Err(EngineError::RateLimit(url.to_string(), wait));
                    }
                    sleep(Duration::from_secs(wait)).await;
                    attempt += 1;
                }
                Ok(r) if !r.status().is_success() => {
                    let status = r.status().as_u16();
                    let body = r.text().await.unwrap_or_default();
                    return Err(EngineError::ApiError(
                        url.to_string(),
                        format!("HTTP {status}: {body}"),
                    ));
                }
                Ok(r) => return r.text().await.map(Some).map_err(EngineError::Http),
                Err(e) => {
                    if attempt >= self.max_retries {
                        return Err(EngineError::Http(e));
                    }
                    let backoff = 2u64.pow(attempt);
                    sleep(Duration::from_secs(backoff)).await;
                    attempt += 1;
                }
            }
        }
    }

    pub async fn get(&self, url: &str) -> Result<String> {
        self.get_optional(url).await?.ok_or_else(|| {
            EngineError::ApiError(url.to_string(), "HTTP 404: not found".to_string())
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let text = self.get(url).await?;
        serde_json::from_str(&text).map_err(|e| EngineError::Parse(e.to_string()))
    }

    pub async fn get_optional_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        match self.get_optional(url).await? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| EngineError::Parse(e.to_string())),
            None => Ok(None),
        }
    }
}
