use std::time::Duration;

/// `User-Agent` sent on every outbound request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client used to reach the Teams webhook.
///
/// One client is built at startup and shared by every request, so
/// connections to the webhook host are pooled.
///
/// # Features
/// - **Timeouts**: `timeout` for the whole request, connect bounded separately
/// - **HTTP/2**: adaptive window and keep-alive when the server negotiates it
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Errors
/// Returns the `reqwest` builder error when the TLS backend cannot be set up.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .user_agent(USER_AGENT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_initialization() {
        assert!(build_http_client(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn test_client_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_http_client(Duration::from_secs(5)).unwrap();
        let response = client.get(server.uri()).send().await.unwrap();

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_client_respects_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = build_http_client(Duration::from_millis(50)).unwrap();
        let err = client.get(server.uri()).send().await.unwrap_err();

        assert!(err.is_timeout());
    }
}
