//! Inbound Terraform Cloud notification payload.
//!
//! Mirrors the documented notification body (payload version 1). Every
//! string field is optional on the wire and defaults to empty.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::error::{RelayError, RelayResult};

/// The only payload version this relay understands
pub const SUPPORTED_PAYLOAD_VERSION: i64 = 1;

/// Unix seconds of `0001-01-01T00:00:00Z`, sent by the platform for unset times.
const ZERO_TIME_SECONDS: i64 = -62_135_596_800;

/// Notification body posted by Terraform Cloud.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct InboundNotificationPayload {
    #[serde(default)]
    pub payload_version: i64,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub notification_configuration_id: String,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub run_url: String,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub run_id: String,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub run_message: String,

    #[serde(default, deserialize_with = "deserialize_run_timestamp")]
    pub run_created_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub run_created_by: String,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub workspace_id: String,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub workspace_name: String,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub organization_name: String,

    /// Only the first entry is rendered.
    #[serde(default)]
    #[validate(length(min = 1, message = "at least one notification is required"))]
    pub notifications: Vec<NotificationEntry>,
}

/// A single run-state notification inside the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationEntry {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub message: String,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub trigger: String,

    /// Informational only; colour selection uses `trigger`.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub run_status: String,

    #[serde(default, deserialize_with = "deserialize_run_timestamp")]
    pub run_updated_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub run_updated_by: String,
}

impl InboundNotificationPayload {
    /// Checks the payload can be translated.
    ///
    /// # Errors
    /// - `UnsupportedVersion` when `payload_version` is not 1
    /// - `InvalidPayload` when `notifications` is empty
    pub fn check(&self) -> RelayResult<()> {
        if self.payload_version != SUPPORTED_PAYLOAD_VERSION {
            return Err(RelayError::UnsupportedVersion(self.payload_version));
        }

        self.validate()?;
        Ok(())
    }

    /// First notification entry, the one that drives the card
    pub fn primary_notification(&self) -> Option<&NotificationEntry> {
        self.notifications.first()
    }
}

/// Treats an explicit `null` like a missing key.
fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Accepts RFC 3339 strings, `null`, `""` and the platform's zero time.
///
/// Anything that is not a real point in time becomes `None`.
fn deserialize_run_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let timestamp: Timestamp = raw.parse().map_err(serde::de::Error::custom)?;
    if timestamp.as_second() == ZERO_TIME_SECONDS {
        return Ok(None);
    }

    Ok(Some(timestamp))
}
