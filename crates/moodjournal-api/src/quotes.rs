use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::http::{build_http_client, relay_url, DEFAULT_RELAY, DEFAULT_TIMEOUT_SECS};

pub const TYPE_FIT_QUOTES_URL: &str = "https://type.fit/api/quotes";

#[derive(Error, Debug)]
pub enum QuoteApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuoteApiError>;

/// One entry of the quotes endpoint's response array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}

pub struct QuoteClient {
    client: reqwest::Client,
    endpoint: String,
    relay: String,
}

impl QuoteClient {
    /// Client for the public type.fit endpoint through the default relay
    pub fn new() -> Result<Self> {
        Self::with_endpoint(
            TYPE_FIT_QUOTES_URL.to_string(),
            DEFAULT_RELAY.to_string(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_endpoint(endpoint: String, relay: String, connect_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(connect_timeout)?,
            endpoint,
            relay,
        })
    }

    /// Final URL the request goes to, relay included
    pub fn request_url(&self) -> String {
        relay_url(&self.relay, &self.endpoint)
    }

    /// Fetch the full quote list
    pub async fn fetch_quotes(&self) -> Result<Vec<QuoteRecord>> {
        let url = self.request_url();
        debug!("Fetching quotes from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        // The relay does not always forward a JSON content type, so parse the text ourselves
        let body = response.text().await?;
        let records: Vec<QuoteRecord> = serde_json::from_str(&body)?;
        debug!("Received {} quotes", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    fn local_client(base: &str) -> QuoteClient {
        QuoteClient::with_endpoint(
            format!("{}/api/quotes", base),
            String::new(),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[test]
    fn test_record_without_author() {
        let records: Vec<QuoteRecord> =
            serde_json::from_str(r#"[{"text":"Hi"},{"text":"Yo","author":null}]"#).unwrap();
        assert_eq!(records[0].author, None);
        assert_eq!(records[1].author, None);
    }

    #[test]
    fn test_default_url_goes_through_relay() {
        let client = QuoteClient::new().unwrap();
        assert!(client.request_url().starts_with(DEFAULT_RELAY));
        assert!(client.request_url().ends_with("type.fit%2Fapi%2Fquotes"));
    }

    #[tokio::test]
    async fn test_fetch_quotes() {
        let body = r#"[{"text":"I love my life","author":"A"},{"text":"Keep going"}]"#;
        let (base, server) = serve_once("200 OK", body.to_string()).await;

        let records = local_client(&base).fetch_quotes().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "I love my life");
        assert_eq!(records[0].author.as_deref(), Some("A"));

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /api/quotes"));
    }

    #[tokio::test]
    async fn test_fetch_quotes_server_error() {
        let (base, _server) = serve_once("503 Service Unavailable", "down".to_string()).await;

        let result = local_client(&base).fetch_quotes().await;
        assert!(matches!(result, Err(QuoteApiError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_fetch_quotes_malformed_body() {
        let (base, _server) = serve_once("200 OK", r#"{"oops":true}"#.to_string()).await;

        let result = local_client(&base).fetch_quotes().await;
        assert!(matches!(result, Err(QuoteApiError::ParseError(_))));
    }
}
