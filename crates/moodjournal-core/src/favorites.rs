// In-memory favorites, deduplicated by content and author
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Quote;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub quote: Quote,
    pub saved_at: DateTime<Utc>,
}

/// Insertion-ordered, append-only list of liked quotes
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    entries: Vec<Favorite>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `quote` unless an identical one is already saved.
    ///
    /// Returns whether the list grew.
    pub fn save(&mut self, quote: &Quote) -> bool {
        if self.contains(quote) {
            return false;
        }

        self.entries.push(Favorite {
            quote: quote.clone(),
            saved_at: Utc::now(),
        });
        true
    }

    pub fn contains(&self, quote: &Quote) -> bool {
        self.entries
            .iter()
            .any(|f| f.quote.content == quote.content && f.quote.author == quote.author)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Favorite> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
