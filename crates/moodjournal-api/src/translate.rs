use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::http::{build_http_client, relay_url, DEFAULT_RELAY, DEFAULT_TIMEOUT_SECS};

/// Unofficial Google Translate endpoint used by the `gtx` web client
pub const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Quotes always arrive in English
const SOURCE_LANGUAGE: &str = "en";

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unexpected translation response shape")]
    UnexpectedShape,
}

pub type Result<T> = std::result::Result<T, TranslateError>;

pub struct TranslateClient {
    client: reqwest::Client,
    endpoint: String,
    relay: String,
}

impl TranslateClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(
            GOOGLE_TRANSLATE_URL.to_string(),
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

    /// Final URL for translating `text` into `target`, relay included
    pub fn request_url(&self, text: &str, target: &str) -> String {
        let target_url = format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.endpoint,
            SOURCE_LANGUAGE,
            urlencoding::encode(target),
            urlencoding::encode(text)
        );
        relay_url(&self.relay, &target_url)
    }

    /// Translate English `text` into the `target` language code
    pub async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let url = self.request_url(text, target);
        debug!("Requesting translation to {}", target);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        extract_translation(&value).ok_or(TranslateError::UnexpectedShape)
    }
}

/// Pull the translated text out of the nested array response.
///
/// The endpoint answers `[[["translated","original",...], ...], ...]`; only
/// the first segment is used.
pub fn extract_translation(value: &Value) -> Option<String> {
    value.get(0)?.get(0)?.get(0)?.as_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;
    use serde_json::json;

    #[test]
    fn test_extract_first_segment() {
        let value = json!([[["Bonjour", "Hello"]]]);
        assert_eq!(extract_translation(&value).as_deref(), Some("Bonjour"));
    }

    #[test]
    fn test_extract_ignores_trailing_metadata() {
        let value = json!([[["Hola mundo", "Hello world", null, null, 10]], null, "en"]);
        assert_eq!(extract_translation(&value).as_deref(), Some("Hola mundo"));
    }

    #[test]
    fn test_extract_unexpected_shapes() {
        assert_eq!(extract_translation(&json!([])), None);
        assert_eq!(extract_translation(&json!({"text": "Bonjour"})), None);
        assert_eq!(extract_translation(&json!([[[42]]])), None);
        assert_eq!(extract_translation(&json!("Bonjour")), None);
    }

    #[test]
    fn test_request_url_direct() {
        let client = TranslateClient::with_endpoint(
            "http://localhost/t".to_string(),
            String::new(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.request_url("Hello world", "fr"),
            "http://localhost/t?client=gtx&sl=en&tl=fr&dt=t&q=Hello%20world"
        );
    }

    #[test]
    fn test_request_url_through_relay() {
        let client = TranslateClient::new().unwrap();
        let url = client.request_url("Hi", "de");
        assert!(url.starts_with(DEFAULT_RELAY));
        // The inner query string is encoded a second time by the relay
        assert!(url.contains("tl%3Dde"));
        assert!(url.contains("q%3DHi"));
    }

    #[tokio::test]
    async fn test_translate_roundtrip_over_http() {
        let (base, server) = serve_once("200 OK", r#"[[["Bonjour","Hello"]]]"#.to_string()).await;
        let client =
            TranslateClient::with_endpoint(format!("{}/t", base), String::new(), Duration::from_secs(2))
                .unwrap();

        let translated = client.translate("Hello", "fr").await.unwrap();
        assert_eq!(translated, "Bonjour");

        let request_line = server.await.unwrap();
        assert!(request_line.contains("tl=fr"));
        assert!(request_line.contains("q=Hello"));
    }

    #[tokio::test]
    async fn test_translate_unexpected_shape() {
        let (base, _server) = serve_once("200 OK", r#"{"error":"nope"}"#.to_string()).await;
        let client =
            TranslateClient::with_endpoint(format!("{}/t", base), String::new(), Duration::from_secs(2))
                .unwrap();

        let result = client.translate("Hello", "fr").await;
        assert!(matches!(result, Err(TranslateError::UnexpectedShape)));
    }
}
