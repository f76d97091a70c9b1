// Domain logic for the mood journal: quotes, moods, labels and favorites
pub mod color;
pub mod config;
pub mod error;
pub mod favorites;
pub mod fetcher;
pub mod labels;
pub mod models;
pub mod mood;
pub mod providers;
pub mod translator;

pub use color::Color;
pub use config::Config;
pub use error::Error;
pub use favorites::{Favorite, Favorites};
pub use fetcher::{QuoteFetcher, QuoteSource};
pub use labels::Labels;
pub use models::{Language, Quote};
pub use mood::{colorize, Mood, Palette};
pub use translator::{translate_quote, Translator};

/// Result type alias used across the core crate
pub type Result<T> = std::result::Result<T, Error>;
