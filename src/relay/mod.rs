//! Terraform Cloud → Microsoft Teams notification relay.
//!
//! The pipeline is linear: [`auth`] checks the signature over the raw body,
//! [`payload`] decodes and checks the notification, [`translator`] builds the
//! [`card::MessageCard`] and [`forwarder`] posts it to Teams.

pub mod auth;
pub mod card;
pub mod error;
pub mod forwarder;
pub mod payload;
pub mod service;
pub mod translator;
pub mod trigger;

pub use auth::{compute_signature, verify_signature, Authentication, SIGNATURE_HEADER};
pub use card::MessageCard;
pub use error::{RelayError, RelayResult};
pub use forwarder::{CardForwarder, TeamsWebhookForwarder};
pub use payload::{InboundNotificationPayload, NotificationEntry};
pub use service::{decode_payload, NotificationRelay};
pub use translator::translate;
pub use trigger::RunTrigger;
