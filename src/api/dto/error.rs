//! Error response DTOs.

use serde::{Deserialize, Serialize};

/// Error code for requests rejected by validation
pub const BAD_REQUEST: &str = "BAD_REQUEST";
/// Error code for failed deliveries to the chat endpoint
pub const BAD_GATEWAY: &str = "BAD_GATEWAY";
/// Error code for everything the caller cannot fix
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Standard error response format.
///
/// Messages are deliberately generic; the detail goes to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Body returned for every validation failure.
    pub fn invalid_request() -> Self {
        Self::new(BAD_REQUEST, "invalid request")
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
