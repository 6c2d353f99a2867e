// src/http.rs
// Shared HTTP client construction for CommonTrace API calls

use std::time::Duration;

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a reqwest client with the given request timeout.
///
/// The API client keeps two of these: one with the read timeout for
/// search/get/list calls, one with the write timeout for contribute/vote/
/// amend calls (writes include server-side embedding generation and are
/// allowed to take longer).
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
