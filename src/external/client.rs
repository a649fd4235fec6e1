use std::time::Duration;

/// User-Agent sent on every outbound request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client for one gateway or lookup store.
///
/// Each collaborator owns its client so that per-service timeouts apply and
/// nothing is shared through process-wide state.
///
/// # Features
/// - **Connection pooling**: idle connections kept for 90s, 10 per host
/// - **Compression**: gzip responses are decoded transparently
/// - **Timeouts**: `timeout` per request, 10s connect timeout
/// - **Security**: Rustls for TLS
///
/// # Example
/// ```ignore
/// let client = build_http_client(Duration::from_secs(30))?;
/// let response = client.get("https://example.com").send().await?;
/// ```
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(USER_AGENT)
        .build()
}
