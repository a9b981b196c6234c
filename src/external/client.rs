use std::time::Duration;

/// Build the HTTP client shared by outbound integrations.
///
/// Constructed once at startup and handed to the push provider, so every
/// send reuses the same connection pool.
///
/// # Features
/// - **Timeouts**: per-request timeout from configuration, 10s connect timeout
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **Compression**: gzip responses
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .gzip(true)
        .user_agent(format!("push-relay/{}", crate::pkg_version()))
        .build()
}
