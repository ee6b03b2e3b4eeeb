//! SAS token fetcher.
//!
//! Issues a single authenticated GET to the auth endpoint and returns the
//! `token` field of the JSON response. Nothing is cached and nothing is
//! retried here; failures are classified so the caller can decide.

use std::time::Duration;

use anyhow::Result;
use http::header::{HeaderValue, ACCEPT, RETRY_AFTER};
use http::StatusCode;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::config::settings::HttpConfig;
use crate::observability::metrics::get_metrics;
use crate::resilience::classification::{classify, FetchFailure, SasTokenError, Tier};
use crate::utils::constants::{AUTH_HEADER, BEARER_PREFIX};

/// Response body of the auth endpoint. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

impl TokenResponse {
    pub fn into_token(self) -> String {
        self.token
    }
}

#[derive(Debug, Clone)]
pub struct TokenFetcher {
    client: Client,
}

impl TokenFetcher {
    /// Build a fetcher whose transport enforces the configured timeouts.
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(http.connect_timeout_ms))
            .timeout(Duration::from_millis(http.timeout_ms))
            .build()?;
        Ok(Self { client })
    }

    /// Reuse an existing client, e.g. one shared with the publisher.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a SAS token from `auth_endpoint`, authenticating with `credential`.
    pub async fn fetch_token(
        &self,
        auth_endpoint: &str,
        credential: &str,
    ) -> Result<TokenResponse, SasTokenError> {
        let metrics = get_metrics().await;
        let start = tokio::time::Instant::now();
        metrics.fetch_requests.with_label_values(&["GET"]).inc();

        debug!(endpoint = %auth_endpoint, "requesting SAS token");
        match self.request_token(auth_endpoint, credential).await {
            Ok(response) => {
                metrics.fetch_duration.with_label_values(&["success"]).observe(start.elapsed().as_secs_f64());
                info!(endpoint = %auth_endpoint, "SAS token received");
                Ok(response)
            }
            Err(failure) => {
                let err = classify(auth_endpoint, failure);
                let tier = err.tier();
                let kind = err.failure().kind();
                metrics.fetch_duration.with_label_values(&["failure"]).observe(start.elapsed().as_secs_f64());
                metrics.fetch_failures.with_label_values(&[tier.as_str(), kind]).inc();
                match tier {
                    Tier::Recoverable => warn!(endpoint = %auth_endpoint, kind, "{}", err),
                    Tier::Unrecoverable => error!(endpoint = %auth_endpoint, kind, "{}", err),
                }
                Err(err)
            }
        }
    }

    async fn request_token(
        &self,
        auth_endpoint: &str,
        credential: &str,
    ) -> Result<TokenResponse, FetchFailure> {
        let url = Url::parse(auth_endpoint)?;
        let mut auth_value = HeaderValue::from_str(&format!("{}{}", BEARER_PREFIX, credential))?;
        auth_value.set_sensitive(true);

        let response = self
            .client
            .get(url)
            .header(AUTH_HEADER, auth_value)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchFailure::Unauthorized);
        }
        if !status.is_success() {
            if let Some(retry_after) = parse_retry_after(response.headers().get(RETRY_AFTER)) {
                return Err(FetchFailure::RetryAfter { status, retry_after });
            }
            return Err(FetchFailure::UnexpectedStatus(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str::<TokenResponse>(&body)?)
    }
}

/// `Retry-After` is either delay seconds or an HTTP date. Anything else is ignored.
fn parse_retry_after(value: Option<&HeaderValue>) -> Option<String> {
    let value = value?.to_str().ok()?.trim();
    let is_seconds = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    let is_http_date = value.ends_with(" GMT") && value.contains(',');
    (is_seconds || is_http_date).then(|| value.to_owned())
}
