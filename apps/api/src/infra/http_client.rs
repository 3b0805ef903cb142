//! HTTP client factory for outbound calls (currently only the Resend API).

use reqwest::Client;
use std::time::Duration;

/// TCP handshake + TLS.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whole request/response. Delivery runs in the background worker, so this
/// bounds how long one attempt can hold a worker slot.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub fn try_build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}
