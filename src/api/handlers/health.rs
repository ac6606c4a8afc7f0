//! Health check endpoint handlers.
//!
//! The relay has no backing store, so the checks report what the service was
//! configured with rather than calling anything. Teams is never called from
//! here; any call would post a card into the channel.

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Application version
    pub version: String,
    /// Timestamp of the health check (RFC 3339)
    pub timestamp: String,
    /// Detailed checks for various components
    pub checks: HashMap<String, ComponentHealth>,
}

/// Health status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Serving, but some notifications will be refused
    Degraded,
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
}

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Configuration summary
/// - `GET /health/live` - Liveness check, empty body
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
}

/// Basic health check endpoint.
///
/// # Example Response
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T12:00:00Z",
///   "checks": {
///     "forwarder": { "status": "healthy", "message": "teams-webhook" },
///     "signature_verification": { "status": "healthy", "message": "enabled" }
///   }
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();

    checks.insert(
        "forwarder".to_string(),
        ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some(state.relay.forwarder_name().to_string()),
        },
    );

    let signature = if state.relay.has_secret() {
        ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("enabled".to_string()),
        }
    } else {
        ComponentHealth {
            status: HealthStatus::Degraded,
            message: Some("disabled, signed notifications will be refused".to_string()),
        }
    };
    checks.insert("signature_verification".to_string(), signature);

    Json(HealthResponse {
        status: overall_status(&checks),
        version: state.settings.application.version.clone(),
        timestamp: Timestamp::now().to_string(),
        checks,
    })
}

/// Liveness check endpoint.
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn overall_status(checks: &HashMap<String, ComponentHealth>) -> HealthStatus {
    checks
        .values()
        .map(|c| c.status)
        .fold(HealthStatus::Healthy, |overall, status| match (overall, status) {
            (HealthStatus::Healthy, HealthStatus::Healthy) => HealthStatus::Healthy,
            _ => HealthStatus::Degraded,
        })
}
