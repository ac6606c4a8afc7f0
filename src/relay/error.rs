use thiserror::Error;

/// Errors raised while relaying a single notification.
///
/// The variants fall into two classes. Validation failures are the caller's
/// fault and map to `400`; everything else is fatal for the request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid method / content-type: {method} / {content_type}")]
    InvalidRequest { method: String, content_type: String },

    #[error("received notification with signature, but no webhook token is configured")]
    MissingSecret,

    #[error("signature is not valid hex: {0}")]
    MalformedSignature(#[from] hex::FromHexError),

    #[error("signature does not match")]
    SignatureMismatch,

    #[error("webhook token cannot key HMAC-SHA512: {0}")]
    InvalidKey(#[from] hmac::digest::InvalidLength),

    #[error("malformed notification payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("payload version not supported: {0}")]
    UnsupportedVersion(i64),

    #[error("invalid notification payload: {0}")]
    InvalidPayload(#[from] validator::ValidationErrors),

    #[error("failed to serialize message card: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("failed to reach Teams webhook: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Teams webhook responded with unexpected status code {status}")]
    UnexpectedStatus { status: u16, body: String },
}

impl RelayError {
    /// Whether the error is a validation failure caused by the inbound request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RelayError::InvalidRequest { .. }
                | RelayError::MalformedSignature(_)
                | RelayError::SignatureMismatch
                | RelayError::UnsupportedVersion(_)
                | RelayError::InvalidPayload(_)
        )
    }

    /// Whether the error came from the outbound Teams call.
    pub fn is_delivery(&self) -> bool {
        matches!(
            self,
            RelayError::Transport(_) | RelayError::UnexpectedStatus { .. }
        )
    }
}

pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(RelayError::SignatureMismatch.is_validation());
        assert!(RelayError::UnsupportedVersion(2).is_validation());
        assert!(
            RelayError::InvalidRequest {
                method: "GET".to_string(),
                content_type: String::new(),
            }
            .is_validation()
        );
        assert!(!RelayError::MissingSecret.is_validation());
    }

    #[test]
    fn test_delivery_classification() {
        let err = RelayError::UnexpectedStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(err.is_delivery());
        assert!(!err.is_validation());
        assert!(!RelayError::MissingSecret.is_delivery());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RelayError::UnsupportedVersion(2).to_string(),
            "payload version not supported: 2"
        );
        assert_eq!(
            RelayError::UnexpectedStatus {
                status: 404,
                body: String::new(),
            }
            .to_string(),
            "Teams webhook responded with unexpected status code 404"
        );
    }
}
