//! Shared HTTP client construction for outbound requests.
//!
//! Every outbound client gets explicit connect and request timeouts so a
//! stuck upstream cannot block a request handler indefinitely.

use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Builds a reqwest client with connection pooling and the given timeouts.
pub fn build_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // Enable compression
        .gzip(true)
        // Security
        .use_rustls_tls()
        .build()
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })
}
