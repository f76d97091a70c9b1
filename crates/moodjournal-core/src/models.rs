use moodjournal_api::QuoteRecord;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{labels::Labels, Error};

/// Author shown when the service omits one
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A quote as displayed to the user.
///
/// Never mutated in place: translation produces a new value with the same
/// author.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub content: String,
    pub author: String,
}

impl Quote {
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: author.into(),
        }
    }

    /// Same author, different words
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: self.author.clone(),
        }
    }
}

impl From<QuoteRecord> for Quote {
    fn from(record: QuoteRecord) -> Self {
        let author = record
            .author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        Self {
            content: record.text,
            author,
        }
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" - {}", self.content, self.author)
    }
}

/// The fixed set of languages the journal can be shown in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Hi,
    Zh,
}

impl Language {
    /// Selector order
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Hi,
        Language::Zh,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Hi => "hi",
            Language::Zh => "zh",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::Hi => "Hindi",
            Language::Zh => "Chinese",
        }
    }

    /// Quotes arrive in the default language and need no translation
    pub fn is_default(self) -> bool {
        self == Language::En
    }

    pub fn labels(self) -> &'static Labels {
        crate::labels::labels_for(self)
    }

    /// Position in [`Language::ALL`]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).unwrap_or(0)
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
