use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    models::{Language, Quote},
    Result,
};

/// Machine translation from English into one of the supported languages.
///
/// Keeps the wire format of whatever service sits behind it away from the UI.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: Language) -> Result<String>;
}

/// Translate a quote, falling back to the untranslated text on any failure.
///
/// The default language needs no request and returns the quote as is.
pub async fn translate_quote(translator: &dyn Translator, quote: &Quote, target: Language) -> Quote {
    if target.is_default() {
        return quote.clone();
    }

    match translator.translate(&quote.content, target).await {
        Ok(translated) => {
            debug!("Translated quote into {}", target.code());
            quote.with_content(translated)
        }
        Err(e) => {
            warn!("Translation into {} failed, keeping original: {}", target.code(), e);
            quote.clone()
        }
    }
}
