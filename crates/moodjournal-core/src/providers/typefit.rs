// type.fit quote list - bridges the API client with QuoteSource
use async_trait::async_trait;
use moodjournal_api::QuoteClient;

use crate::{config::EndpointConfig, fetcher::QuoteSource, models::Quote, Error, Result};

/// Wrapper around QuoteClient that implements QuoteSource
pub struct TypeFitSource {
    client: QuoteClient,
}

impl TypeFitSource {
    pub fn new(endpoints: &EndpointConfig) -> Result<Self> {
        let client = QuoteClient::with_endpoint(
            endpoints.quotes_url.clone(),
            endpoints.relay_url.clone(),
            endpoints.timeout(),
        )
        .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl QuoteSource for TypeFitSource {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        let records = self
            .client
            .fetch_quotes()
            .await
            .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(records.into_iter().map(Quote::from).collect())
    }
}
