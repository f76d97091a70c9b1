use thiserror::Error;

/// Everything that can go wrong while fetching, translating or configuring
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Quote service returned no quotes")]
    EmptyQuoteList,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
