//! Error handler for converting AppError to HTTP responses.
//!
//! Validation failures all get the same generic 400 body. Fatal failures are
//! logged in full here and answered with a generic 500-class body, so no
//! internal detail leaks to the caller.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::dto::{ErrorResponse, BAD_GATEWAY, INTERNAL_ERROR};
use crate::error::AppError;
use crate::relay::RelayError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - relay validation failures → 400 BAD_REQUEST
    /// - relay delivery failures → 502 BAD_GATEWAY
    /// - MissingSecret, malformed payloads, serialization → 500
    /// - Configuration → 500 with the offending key
    /// - Internal → 500
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::Relay(err) if err.is_validation() => {
                tracing::warn!(error = %err, "Rejected notification");
                (StatusCode::BAD_REQUEST, ErrorResponse::invalid_request())
            }
            AppError::Relay(err) if err.is_delivery() => {
                tracing::error!(error = %err, "Failed to deliver notification");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(BAD_GATEWAY, "failed to deliver notification"),
                )
            }
            AppError::Relay(err) => {
                log_fatal_relay_error(err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR, "An internal error occurred"),
                )
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = ?source, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("CONFIGURATION_ERROR", "Configuration error")
                        .with_details(json!({ "key": key })),
                )
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR, "An internal error occurred"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

fn log_fatal_relay_error(err: &RelayError) {
    match err {
        RelayError::MissingSecret => {
            tracing::error!(error = %err, "Set TFE_WEBHOOK_TOKEN to accept signed notifications")
        }
        _ => tracing::error!(error = %err, "Failed to relay notification"),
    }
}

/// Rewrites error responses produced outside our handlers (unknown routes,
/// wrong methods on `/health`, timeouts, oversized bodies) into the
/// `ErrorResponse` format.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    let (code, message) = match status {
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timed out"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request body too large"),
        s if s.is_client_error() => ("BAD_REQUEST", "invalid request"),
        _ => (INTERNAL_ERROR, "An internal error occurred"),
    };

    let mut converted = (status, Json(ErrorResponse::new(code, message))).into_response();
    // Keep headers set by inner layers, such as x-request-id
    for (name, value) in response.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            converted.headers_mut().insert(name.clone(), value.clone());
        }
    }
    converted
}
