//! Webhook client
//!
//! Posts card documents to a Teams incoming webhook with retry logic and
//! an overall time limit.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, warn};

use crate::errors::DeliveryError;
use crate::teams::card::CardDocument;

/// Time allowed for a single webhook POST.
pub const WEBHOOK_SEND_TIMEOUT: Duration = Duration::from_secs(5);

// Legacy Office 365 connectors answer a successful POST with this body.
const EXPECTED_RESPONSE_BODY: &str = "1";

/// How often and for how long to keep trying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first one fails.
    pub retries: u32,
    pub delay: Duration,
    /// Upper bound for all attempts and delays together.
    pub timeout: Duration,
}

/// Something that can deliver a card to a webhook URL.
#[async_trait]
pub trait WebhookSender: Send + Sync {
    async fn send(
        &self,
        webhook_url: &str,
        card: &CardDocument,
        policy: RetryPolicy,
    ) -> Result<(), DeliveryError>;
}

/// Teams webhook client backed by `reqwest`.
pub struct TeamsClient {
    http: Client,
    ignore_invalid_response: bool,
}

impl TeamsClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(user_agent: &str) -> Result<Self, DeliveryError> {
        let http = Client::builder()
            .timeout(WEBHOOK_SEND_TIMEOUT)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http,
            ignore_invalid_response: false,
        })
    }

    /// Accept any successful HTTP response, whatever its body.
    #[must_use]
    pub fn ignore_invalid_response(mut self, ignore: bool) -> Self {
        self.ignore_invalid_response = ignore;
        self
    }

    async fn post_once(&self, webhook_url: &str, body: &str) -> Result<(), DeliveryError> {
        let resp = self
            .http
            .post(webhook_url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body.to_string())
            .send()
            .await
            .inspect_err(|e| warn!("Webhook request failed: {}", e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());

        if !status.is_success() {
            warn!("Webhook POST failed: status={} body={}", status, text);
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim() != EXPECTED_RESPONSE_BODY {
            if self.ignore_invalid_response {
                debug!("Ignoring unexpected webhook response: {:?}", text);
            } else {
                warn!("Unexpected webhook response: {:?}", text);
                return Err(DeliveryError::InvalidResponse { body: text });
            }
        }

        Ok(())
    }
}

#[async_trait]
impl WebhookSender for TeamsClient {
    async fn send(
        &self,
        webhook_url: &str,
        card: &CardDocument,
        policy: RetryPolicy,
    ) -> Result<(), DeliveryError> {
        if let Some(problem) = card.validation_problem() {
            return Err(DeliveryError::InvalidCard(problem));
        }

        let body = serde_json::to_string(card)?;
        debug!("Submitting card: {}", body);

        let strategy = FixedInterval::new(policy.delay).take(policy.retries as usize);
        let attempts = Retry::spawn(strategy, || self.post_once(webhook_url, &body));

        tokio::time::timeout(policy.timeout, attempts)
            .await
            .map_err(|_| DeliveryError::Timeout(policy.timeout))?
    }
}
