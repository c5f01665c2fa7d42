//! HTTP client factory for forge API calls.
//!
//! Every client carries a User-Agent (GitHub rejects requests without one),
//! `tcp_nodelay`, and a bounded timeout so a stalled call cannot block the
//! rest of a publish run indefinitely.

use std::time::Duration;

use reqwest::Client;

/// User-Agent string for all HTTP requests
pub const USER_AGENT: &str = concat!("inline-review/", env!("CARGO_PKG_VERSION"));

/// Default timeout for a single API request (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on connection establishment, independent of the total timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection pool idle timeout so DNS is re-resolved between long pauses.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Creates an HTTP client with default configuration (30s timeout).
pub fn create_default_client() -> reqwest::Result<Client> {
    create_client_with_timeout(DEFAULT_TIMEOUT)
}

/// Creates an HTTP client with a custom total timeout.
///
/// The read timeout is capped at 60s to avoid hangs on truncated responses.
pub fn create_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
    let read_timeout = timeout.min(Duration::from_secs(60));

    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .read_timeout(read_timeout)
        .tcp_nodelay(true)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .pool_max_idle_per_host(4)
        .build()
}
