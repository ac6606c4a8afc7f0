//! Logging middleware for request/response tracing.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, info_span, Instrument};

use super::RequestId;

/// Runs the request inside an `http_request` span and logs its start and end.
///
/// Everything the relay logs while handling the request, including the
/// outbound Teams call, is recorded inside that span.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = info_span!(
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id
    );

    async move {
        info!(path = %uri.path(), "Request received");

        let start = Instant::now();
        let response = next.run(request).await;

        info!(
            status = %response.status().as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "Response sent"
        );

        response
    }
    .instrument(span)
    .await
}
