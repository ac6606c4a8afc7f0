//! Router configuration.

use std::time::Duration;

use axum::{http::StatusCode, middleware, Router};
use tower_http::timeout::TimeoutLayer;

use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID - generates or propagates `x-request-id`
/// 2. Logging - opens the `http_request` span
/// 3. Error formatting - turns plain error responses into `ErrorResponse`
/// 4. Timeout - bounds the whole request, including the Teams call
///
/// # Routes
/// - `<relay.path>` - notification endpoint (default `/`)
/// - `/health`, `/health/live`
pub fn create_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.settings.server.request_timeout);

    Router::new()
        .merge(handlers::health::health_routes())
        .merge(handlers::relay::relay_routes(&state.settings.relay.path))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{RelayConfig, Settings};
    use crate::relay::{CardForwarder, MessageCard, RelayResult};
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct NoopForwarder;

    #[async_trait]
    impl CardForwarder for NoopForwarder {
        async fn forward(&self, _card: &MessageCard) -> RelayResult<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "noop"
        }
    }

    struct StalledForwarder;

    #[async_trait]
    impl CardForwarder for StalledForwarder {
        async fn forward(&self, _card: &MessageCard) -> RelayResult<()> {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            Ok(())
        }

        fn name(&self) -> &'static str {
            "stalled"
        }
    }

    fn router_with_token(path: &str, token: Option<&str>) -> Router {
        let settings = Settings {
            relay: RelayConfig {
                teams_webhook_url: "https://example.com/hook".to_string(),
                tfe_webhook_token: token.map(str::to_string),
                path: path.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        create_router(AppState::with_forwarder(settings, Arc::new(NoopForwarder)))
    }

    fn router(path: &str) -> Router {
        router_with_token(path, Some("secret"))
    }

    async fn health_body(app: Router) -> serde_json::Value {
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_liveness_has_empty_body() {
        let response = router("/").oneshot(get("/health/live")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let body = health_body(router("/")).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], crate::pkg_version());
        assert_eq!(body["checks"]["forwarder"]["message"], "noop");
        assert_eq!(body["checks"]["signature_verification"]["status"], "healthy");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_health_is_degraded_without_token() {
        let body = health_body(router_with_token("/", None)).await;

        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["signature_verification"]["status"], "degraded");
        assert_eq!(body["checks"]["forwarder"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_relay_path_is_configurable() {
        let app = router("/hooks/tfe");

        let request = Request::builder()
            .method("POST")
            .uri("/hooks/tfe")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"payload_version":1,"notifications":[{"message":"Planned","trigger":"run:planning"}]}"#,
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let mut settings = Settings {
            relay: RelayConfig {
                teams_webhook_url: "https://example.com/hook".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        settings.server.request_timeout = 1;
        let app = create_router(AppState::with_forwarder(settings, Arc::new(StalledForwarder)));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"payload_version":1,"notifications":[{"message":"Planned","trigger":"run:planning"}]}"#,
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "REQUEST_TIMEOUT");
    }
}
