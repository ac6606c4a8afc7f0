//! Inbound notification endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method},
    response::Json,
    routing::any,
    Router,
};

use crate::error::AppResult;
use crate::relay::{MessageCard, RelayError, RelayResult, SIGNATURE_HEADER};
use crate::state::AppState;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Mounts the relay endpoint at `path`.
///
/// Every method is routed to the handler so that a wrong method is answered
/// with the generic 400 instead of a 405.
pub fn relay_routes(path: &str) -> Router<AppState> {
    Router::new().route(path, any(relay_notification))
}

/// Relays one Terraform Cloud notification to Teams.
///
/// # Responses
/// - `200 OK` - the delivered MessageCard
/// - `400 Bad Request` - wrong method or content type, bad signature,
///   unsupported payload
/// - `500 Internal Server Error` - malformed JSON, signature without token
/// - `502 Bad Gateway` - Teams did not accept the card
pub async fn relay_notification(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<MessageCard>> {
    check_request(&method, &headers)?;

    // A non-UTF-8 header is kept so that it fails the hex check
    let signature = headers
        .get(SIGNATURE_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    let card = state.relay.relay(&body, signature.as_deref()).await?;
    Ok(Json(card))
}

/// Only `POST` with a content type of exactly `application/json` is accepted.
fn check_request(method: &Method, headers: &HeaderMap) -> RelayResult<()> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();

    if *method != Method::POST || content_type != JSON_CONTENT_TYPE {
        return Err(RelayError::InvalidRequest {
            method: method.to_string(),
            content_type,
        });
    }

    Ok(())
}
