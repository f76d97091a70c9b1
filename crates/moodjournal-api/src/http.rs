// Shared HTTP plumbing: client construction and the CORS relay
use std::time::Duration;

/// Public CORS relay both services are reached through by default
pub const DEFAULT_RELAY: &str = "https://api.allorigins.win/raw?url=";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("MoodJournal/", env!("CARGO_PKG_VERSION"));

/// Build the reqwest client used by every API client in this crate
pub fn build_http_client(connect_timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(USER_AGENT),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(connect_timeout)
        .build()
}

/// Route `target` through `relay`.
///
/// The relay takes the target as a url-encoded suffix. An empty relay means
/// talk to the target directly.
pub fn relay_url(relay: &str, target: &str) -> String {
    if relay.is_empty() {
        target.to_string()
    } else {
        format!("{}{}", relay, urlencoding::encode(target))
    }
}
