//! Best-effort webhook delivery.
//!
//! [`WebhookDelivery`] posts a JSON-encoded [`WorkflowEvent`] to the
//! workflow automation URL. Each event is attempted exactly once; callers
//! log failures and carry on, the primary request is never failed by it.

use std::time::Duration;

use crate::event::WorkflowEvent;

/// HTTP request timeout for a delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Delivers workflow events to a single configured endpoint.
#[derive(Clone)]
pub struct WebhookDelivery {
    client: reqwest::Client,
    url: String,
}

impl WebhookDelivery {
    /// Create a delivery service for `url` with its own HTTP client.
    pub fn new(url: impl Into<String>) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, url))
    }

    /// Create a delivery service reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// POST the event once and check the response status.
    pub async fn deliver(&self, event: &WorkflowEvent) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(event).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(
            url = %self.url,
            event_type = event.event_type,
            record_id = event.record_id,
            "Webhook delivered"
        );
        Ok(())
    }

    /// Deliver and swallow any failure with a warning.
    ///
    /// Returns whether the delivery succeeded, for callers that report it.
    pub async fn deliver_best_effort(&self, event: &WorkflowEvent) -> bool {
        match self.deliver(event).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    url = %self.url,
                    event_type = event.event_type,
                    record_id = event.record_id,
                    error = %e,
                    "Webhook delivery failed",
                );
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
