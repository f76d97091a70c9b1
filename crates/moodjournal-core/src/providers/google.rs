// Google Translate - bridges the API client with Translator
use async_trait::async_trait;
use moodjournal_api::TranslateClient;

use crate::{
    config::EndpointConfig,
    models::Language,
    translator::Translator,
    Error, Result,
};

/// Wrapper around TranslateClient that implements Translator
pub struct GoogleTranslator {
    client: TranslateClient,
}

impl GoogleTranslator {
    pub fn new(endpoints: &EndpointConfig) -> Result<Self> {
        let client = TranslateClient::with_endpoint(
            endpoints.translate_url.clone(),
            endpoints.relay_url.clone(),
            endpoints.timeout(),
        )
        .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        self.client
            .translate(text, target.code())
            .await
            .map_err(|e| Error::ApiError(e.to_string()))
    }
}
