//! External provider adapter for the top-up API.
//!
//! The provider exposes a single GET endpoint taking the retailer id,
//! recipient and amount as query parameters; the retailer id and amount are
//! constants owned by this service, never caller input. Credentials come
//! from process configuration.
//!
//! [`ProviderClient::send_airtime`] never returns an error. Connection
//! failures, non-2xx statuses, garbled bodies and embedded failure flags are
//! all normalized into a [`TopUpOutcome`] so the request handler only deals
//! with delivered / pending / failed.

pub mod types;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use airtime_core::Amount;

pub use types::{ProviderFailure, RawTopUpResponse, TopUpOutcome};

/// Error type for a single provider request, before normalization.
#[derive(Debug, thiserror::Error)]
enum ProviderError {
    /// The request never produced a response (connect error, timeout, TLS).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The response body was not valid JSON.
    #[error("unparsable provider response: {0}")]
    BadBody(String),
}

impl ProviderError {
    fn into_outcome(self) -> TopUpOutcome {
        match self {
            ProviderError::Request(err) => TopUpOutcome::Failed {
                kind: ProviderFailure::Unreachable,
                message: err.to_string(),
            },
            ProviderError::Status { status, message } => TopUpOutcome::Failed {
                kind: ProviderFailure::Rejected(status),
                message: message.unwrap_or_else(|| format!("HTTP error! Status: {status}")),
            },
            ProviderError::BadBody(_) => TopUpOutcome::Failed {
                kind: ProviderFailure::BadResponse,
                message: "Unknown response format".to_string(),
            },
        }
    }
}

/// Client for the third-party top-up API.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    base_url: String,
    retailer: String,
    api_key: Option<String>,
    api_secret: Option<String>,
}

impl ProviderClient {
    /// Create a new provider client.
    ///
    /// `timeout` bounds the whole external call; the provider is the only
    /// meaningful-latency I/O in a request, so it must never hang
    /// indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        retailer: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retailer: retailer.into(),
            api_key: None,
            api_secret: None,
        })
    }

    /// Attach API credentials sent as headers on every request.
    #[must_use]
    pub fn with_credentials(
        mut self,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Self {
        self.api_key = api_key;
        self.api_secret = api_secret;
        self
    }

    /// Issue a top-up for `recipient` and normalize the result.
    pub async fn send_airtime(&self, recipient: &str, amount: Amount) -> TopUpOutcome {
        match self.request(recipient, amount).await {
            Ok(raw) => raw.into_outcome(),
            Err(err) => {
                warn!(recipient = %recipient, error = %err, "provider call failed");
                err.into_outcome()
            }
        }
    }

    async fn request(
        &self,
        recipient: &str,
        amount: Amount,
    ) -> Result<RawTopUpResponse, ProviderError> {
        let url = format!("{}/airtime", self.base_url);

        debug!(url = %url, recipient = %recipient, amount = %amount, "calling top-up provider");

        let mut request = self.client.get(&url).query(&[
            ("retailer", self.retailer.as_str()),
            ("recipient", recipient),
            ("amount", amount.to_string().as_str()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header("ApiKey", key);
        }
        if let Some(secret) = &self.api_secret {
            request = request.header("ApiSecret", secret);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Relay the provider's own message when the error body carries one.
            let message = serde_json::from_str::<RawTopUpResponse>(&body)
                .ok()
                .and_then(|r| r.message);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::BadBody(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = ProviderClient::new(
            "https://tppgh.myone4all.com/api/TopUpApi/",
            "RETAILER",
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://tppgh.myone4all.com/api/TopUpApi");
    }
}
