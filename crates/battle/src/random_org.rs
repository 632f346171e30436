//! HTTP random source backed by random.org's plain-text decimal endpoint.

use std::time::Duration;

use async_trait::async_trait;
use mealmax_core::error::CoreError;
use mealmax_core::random::{parse_fraction, RandomSource};

/// One two-decimal fraction per request, plain text.
pub const DEFAULT_RANDOM_ORG_URL: &str =
    "https://www.random.org/decimal-fractions/?num=1&dec=2&col=1&format=plain&rnd=new";

/// Request budget before the draw fails with a timeout.
pub const DEFAULT_RANDOM_TIMEOUT: Duration = Duration::from_secs(5);

const PROVIDER: &str = "random.org";

/// Where to fetch random fractions from and how long to wait.
#[derive(Debug, Clone)]
pub struct RandomOrgConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for RandomOrgConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RANDOM_ORG_URL.to_string(),
            timeout: DEFAULT_RANDOM_TIMEOUT,
        }
    }
}

/// [`RandomSource`] that performs one blocking-with-timeout GET per draw.
pub struct RandomOrgClient {
    client: reqwest::Client,
    url: String,
}

impl RandomOrgClient {
    pub fn new(config: &RandomOrgConfig) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Fetch and parse one fraction.
    pub async fn fetch(&self) -> Result<f64, CoreError> {
        tracing::info!(url = %self.url, "Fetching random number");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(transport_error)?;
        let body = response.text().await.map_err(transport_error)?;

        let value = parse_fraction(PROVIDER, &body).inspect_err(|e| {
            tracing::error!(error = %e, "Malformed random payload");
        })?;
        tracing::info!(value, "Received random number");
        Ok(value)
    }
}

#[async_trait]
impl RandomSource for RandomOrgClient {
    async fn draw(&self) -> Result<f64, CoreError> {
        self.fetch().await
    }
}

fn transport_error(err: reqwest::Error) -> CoreError {
    if err.is_timeout() {
        tracing::error!("Request to {PROVIDER} timed out");
        CoreError::Timeout(format!("Request to {PROVIDER} timed out."))
    } else {
        tracing::error!(error = %err, "Request to {PROVIDER} failed");
        CoreError::Runtime(format!("Request to {PROVIDER} failed: {err}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
