//! The relay pipeline: authenticate, decode, check, translate, forward.

use std::sync::Arc;

use super::auth::{verify_signature, Authentication};
use super::card::MessageCard;
use super::error::{RelayError, RelayResult};
use super::forwarder::CardForwarder;
use super::payload::InboundNotificationPayload;
use super::translator::translate;

/// Stateless notification relay.
///
/// Holds only the shared secret and the forwarder; each call to
/// [`NotificationRelay::relay`] is independent.
pub struct NotificationRelay {
    secret: Option<String>,
    forwarder: Arc<dyn CardForwarder>,
}

impl NotificationRelay {
    pub fn new(secret: Option<String>, forwarder: Arc<dyn CardForwarder>) -> Self {
        let secret = secret.filter(|s| !s.trim().is_empty());
        Self { secret, forwarder }
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    pub fn forwarder_name(&self) -> &'static str {
        self.forwarder.name()
    }

    /// Runs one notification through the pipeline and returns the card that
    /// was delivered.
    ///
    /// Nothing is decoded until the signature has been checked, and nothing is
    /// forwarded unless the payload passes [`InboundNotificationPayload::check`].
    pub async fn relay(&self, body: &[u8], signature: Option<&str>) -> RelayResult<MessageCard> {
        let authentication = verify_signature(body, signature, self.secret.as_deref())?;
        tracing::debug!(?authentication, "notification authenticated");

        let payload = decode_payload(body)?;
        payload.check()?;

        let card = translate(&payload)?;
        self.forwarder.forward(&card).await?;

        tracing::info!(
            run_id = %payload.run_id,
            workspace = %payload.workspace_name,
            signed = authentication == Authentication::Verified,
            forwarder = self.forwarder.name(),
            "notification relayed"
        );

        Ok(card)
    }
}

/// Parses the raw body, logging it when it is not a valid payload.
pub fn decode_payload(body: &[u8]) -> RelayResult<InboundNotificationPayload> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %String::from_utf8_lossy(body),
            "failed to decode notification payload"
        );
        RelayError::MalformedPayload(e)
    })
}
