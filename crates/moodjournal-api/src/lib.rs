// API clients for the quote and translation services
pub mod http;
pub mod quotes;
pub mod translate;

// Re-export common types
pub use http::{relay_url, DEFAULT_RELAY, DEFAULT_TIMEOUT_SECS};
pub use quotes::{QuoteApiError, QuoteClient, QuoteRecord, TYPE_FIT_QUOTES_URL};
pub use translate::{extract_translation, TranslateClient, TranslateError, GOOGLE_TRANSLATE_URL};
