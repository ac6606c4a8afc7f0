//! Delivery of MessageCards to the Teams incoming webhook.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use super::card::MessageCard;
use super::error::{RelayError, RelayResult};

/// Sink for translated cards.
///
/// The HTTP implementation is [`TeamsWebhookForwarder`]; tests and the
/// `render` command plug in their own.
#[async_trait]
pub trait CardForwarder: Send + Sync {
    /// Delivers one card. No retry is attempted.
    async fn forward(&self, card: &MessageCard) -> RelayResult<()>;

    /// Forwarder name for logging
    fn name(&self) -> &'static str;
}

/// Posts cards to a Teams incoming webhook URL.
pub struct TeamsWebhookForwarder {
    client: reqwest::Client,
    url: Url,
}

impl TeamsWebhookForwarder {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl CardForwarder for TeamsWebhookForwarder {
    async fn forward(&self, card: &MessageCard) -> RelayResult<()> {
        let body = serde_json::to_vec(card).map_err(RelayError::Serialization)?;
        let start = Instant::now();

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.clone())
            .send()
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "failed to send message card to Teams");
            })?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let response_body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                duration_ms,
                response = %response_body,
                payload = %String::from_utf8_lossy(&body),
                "Teams webhook rejected message card"
            );
            return Err(RelayError::UnexpectedStatus {
                status: status.as_u16(),
                body: response_body,
            });
        }

        tracing::debug!(status = status.as_u16(), duration_ms, "message card delivered");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "teams-webhook"
    }
}
