use collector_core::CatalogError;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

const MAX_ATTEMPTS: u32 = 3;

/// Caps outgoing provider calls to `max_requests` in any trailing `window`.
#[derive(Clone)]
pub struct RateLimiter {
    sent: Arc<Mutex<VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            sent: Arc::new(Mutex::new(VecDeque::new())),
            max_requests: max_requests.max(1),
            window,
        }
    }

    /// Wait for a free slot and claim it.
    pub async fn acquire(&self) {
        while let Err(wait) = self.try_claim().await {
            tracing::debug!("Provider budget spent, next slot in {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Claim a slot now, or report how long until the oldest claim expires.
    async fn try_claim(&self) -> Result<(), Duration> {
        let mut sent = self.sent.lock().await;
        let now = Instant::now();
        let horizon = now.checked_sub(self.window);

        sent.retain(|at| horizon.map_or(true, |h| *at > h));

        if sent.len() < self.max_requests {
            sent.push_back(now);
            return Ok(());
        }

        let expires = sent.front().map_or(now, |oldest| *oldest + self.window);
        Err(expires.saturating_duration_since(now) + Duration::from_millis(5))
    }
}

/// HTTP client shared by the provider clients: rate limiting plus bounded
/// retry on HTTP 429.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    rate_limiter: RateLimiter,
    retry_wait: Duration,
}

impl HttpTransport {
    /// `requests_per_minute` caps outgoing calls across every clone.
    pub fn new(requests_per_minute: usize) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            rate_limiter: RateLimiter::new(requests_per_minute, Duration::from_secs(60)),
            retry_wait: Duration::from_secs(15),
        }
    }

    /// Wait between 429 retries.
    pub fn with_retry_wait(mut self, wait: Duration) -> Self {
        self.retry_wait = wait;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send a request with rate limiting and automatic 429 retry.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, CatalogError> {
        let request = builder.build().map_err(|e| CatalogError::ApiError(e.to_string()))?;

        for attempt in 0..MAX_ATTEMPTS {
            self.rate_limiter.acquire().await;
            let req_clone = request
                .try_clone()
                .ok_or_else(|| CatalogError::ApiError("Cannot clone request".to_string()))?;
            let response = self
                .client
                .execute(req_clone)
                .await
                .map_err(|e| CatalogError::ApiError(e.to_string()))?;

            if response.status().as_u16() != 429 {
                return Ok(response);
            }

            tracing::warn!(
                "Provider 429 rate limited, waiting {}s before retry {}/{}",
                self.retry_wait.as_secs(),
                attempt + 1,
                MAX_ATTEMPTS
            );
            tokio::time::sleep(self.retry_wait).await;
        }

        Err(CatalogError::RateLimited(format!(
            "{} still rate limited after {} attempts",
            request.url(),
            MAX_ATTEMPTS
        )))
    }

    /// Send and decode a JSON body, mapping non-2xx responses to errors.
    pub async fn get_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, CatalogError> {
        let response = self.send(builder).await?;

        if !response.status().is_success() {
            return Err(CatalogError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidData(e.to_string()))
    }
}
