use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::{models::Quote, Error, Result};

/// Anything that can hand back a batch of quotes.
///
/// The public quote service is one implementation; tests plug in mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>>;
}

/// Fetches a batch from its source and keeps one quote at random
pub struct QuoteFetcher {
    source: Box<dyn QuoteSource>,
}

impl QuoteFetcher {
    pub fn new(source: Box<dyn QuoteSource>) -> Self {
        Self { source }
    }

    /// One request, one uniformly random quote
    pub async fn next_quote(&self) -> Result<Quote> {
        let quotes = self.source.fetch_quotes().await?;
        debug!("Picking from {} quotes", quotes.len());
        pick_random(quotes, &mut rand::rng())
    }
}

/// Choose one quote uniformly; an empty batch is an error
pub fn pick_random<R: Rng + ?Sized>(mut quotes: Vec<Quote>, rng: &mut R) -> Result<Quote> {
    if quotes.is_empty() {
        return Err(Error::EmptyQuoteList);
    }

    let index = rng.random_range(0..quotes.len());
    Ok(quotes.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::{colorize, POSITIVE_PALETTE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_single_quote_is_selected() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch_quotes()
            .times(1)
            .returning(|| Ok(vec![Quote::new("I love my life", "A")]));

        let fetcher = QuoteFetcher::new(Box::new(source));
        let quote = fetcher.next_quote().await.unwrap();

        assert_eq!(quote, Quote::new("I love my life", "A"));
        assert_eq!(colorize(&quote.content, &mut rand::rng()), POSITIVE_PALETTE);
    }

    #[tokio::test]
    async fn test_empty_batch_is_error() {
        let mut source = MockQuoteSource::new();
        source.expect_fetch_quotes().returning(|| Ok(Vec::new()));

        let fetcher = QuoteFetcher::new(Box::new(source));
        assert!(matches!(
            fetcher.next_quote().await,
            Err(Error::EmptyQuoteList)
        ));
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch_quotes()
            .returning(|| Err(Error::ApiError("offline".to_string())));

        let fetcher = QuoteFetcher::new(Box::new(source));
        assert!(matches!(fetcher.next_quote().await, Err(Error::ApiError(_))));
    }

    #[test]
    fn test_pick_random_hits_every_quote() {
        let quotes: Vec<_> = (0..4).map(|i| Quote::new(i.to_string(), "A")).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            seen.insert(pick_random(quotes.clone(), &mut rng).unwrap().content);
        }
        assert_eq!(seen.len(), 4);
    }
}
