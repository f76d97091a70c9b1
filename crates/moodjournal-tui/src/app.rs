// TUI application state and its transitions
use moodjournal_core::{colorize, Favorites, Labels, Language, Palette, Quote};
use ratatui::widgets::ListState;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::confetti::Confetti;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,    // Fetch in flight, card hidden
    Displaying, // Card visible, maybe mid-translation
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,         // Main view
    LanguagePicker, // Language popup open
}

/// Work the event loop should start on behalf of the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub token: u64,
    pub source: Quote,
    pub target: Language,
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub phase: Phase,
    pub language: Language,
    pub labels: &'static Labels,
    /// What the card shows, translated when the language is not English
    pub quote: Option<Quote>,
    // The quote as fetched, always the translation source
    source_quote: Option<Quote>,
    pub palette: Palette,
    pub favorites: Favorites,
    pub favorites_state: ListState,
    pub confetti: Confetti,
    pub confetti_enabled: bool,
    pub translating: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub language_cursor: usize,
    viewport: (u16, u16),
    // Latest request tokens; completions carrying older ones are dropped
    fetch_token: u64,
    translation_token: u64,
}

impl App {
    pub fn new(language: Language) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            phase: Phase::Loading,
            language,
            labels: language.labels(),
            quote: None,
            source_quote: None,
            palette: Palette::default(),
            favorites: Favorites::new(),
            favorites_state: ListState::default(),
            confetti: Confetti::new(),
            confetti_enabled: true,
            translating: false,
            status_message: None,
            error_message: None,
            language_cursor: language.index(),
            viewport: (0, 0),
            fetch_token: 0,
            translation_token: 0,
        }
    }

    pub fn with_confetti(mut self, enabled: bool) -> Self {
        self.confetti_enabled = enabled;
        self
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Area the confetti is thrown into
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        if self.viewport != (width, height) {
            // Particles are positioned for the old size
            self.confetti.clear();
        }
        self.viewport = (width, height);
    }

    /// Start a new fetch and hand back its token
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_token += 1;
        // Anything still translating belongs to the quote being replaced
        self.translation_token += 1;
        self.translating = false;
        self.phase = Phase::Loading;
        self.error_message = None;
        debug!("Fetch #{} started", self.fetch_token);
        self.fetch_token
    }

    /// Apply a finished fetch.
    ///
    /// Returns the follow-up translation when the journal is not in English.
    pub fn complete_fetch(
        &mut self,
        token: u64,
        result: moodjournal_core::Result<Quote>,
    ) -> Option<TranslationRequest> {
        if token != self.fetch_token {
            debug!("Dropping stale fetch #{} (latest #{})", token, self.fetch_token);
            return None;
        }

        self.phase = Phase::Displaying;

        match result {
            Ok(quote) => {
                info!("New quote by {}", quote.author);
                let mut rng = rand::rng();
                self.palette = colorize(&quote.content, &mut rng);
                if self.confetti_enabled {
                    self.confetti.launch(self.viewport.0, self.viewport.1, &mut rng);
                }
                self.source_quote = Some(quote.clone());
                self.quote = Some(quote);
                self.error_message = None;

                if self.language.is_default() {
                    None
                } else {
                    self.next_translation()
                }
            }
            Err(e) => {
                warn!("Quote fetch failed: {}", e);
                self.error_message = Some(format!("Failed to load quote: {}", e));
                // The language may have changed while loading; the prior quote catches up
                let untranslated = self.quote.is_some() && self.quote == self.source_quote;
                if !self.language.is_default() && untranslated {
                    self.next_translation()
                } else {
                    None
                }
            }
        }
    }

    /// Switch language: labels change now, the quote follows once translated.
    ///
    /// While a fetch is in flight nothing is requested; the incoming quote is
    /// translated when it lands.
    pub fn set_language(&mut self, language: Language) -> Option<TranslationRequest> {
        info!("Language set to {}", language.code());
        self.language = language;
        self.labels = language.labels();
        self.language_cursor = language.index();

        if language.is_default() {
            self.translation_token += 1;
            self.translating = false;
            if self.source_quote.is_some() {
                self.quote = self.source_quote.clone();
            }
            return None;
        }

        if self.is_loading() {
            return None;
        }
        self.next_translation()
    }

    /// Apply a finished translation if it is still the latest one
    pub fn complete_translation(&mut self, token: u64, quote: Quote) -> bool {
        if token != self.translation_token || self.is_loading() {
            debug!(
                "Dropping stale translation #{} (latest #{})",
                token, self.translation_token
            );
            return false;
        }

        self.translating = false;
        self.quote = Some(quote);
        true
    }

    fn next_translation(&mut self) -> Option<TranslationRequest> {
        let source = self.source_quote.clone()?;
        self.translation_token += 1;
        self.translating = true;

        Some(TranslationRequest {
            token: self.translation_token,
            source,
            target: self.language,
        })
    }

    /// Save the quote on the card; duplicates are ignored
    pub fn save_favorite(&mut self) -> bool {
        let Some(quote) = &self.quote else {
            return false;
        };

        let saved = self.favorites.save(quote);
        self.status_message = Some(if saved {
            format!("❤ {} ({})", self.labels.favorite, self.favorites.len())
        } else {
            "Already saved".to_string()
        });

        if saved && self.favorites_state.selected().is_none() {
            self.favorites_state.select(Some(0));
        }
        saved
    }

    pub fn tick(&mut self, dt: Duration) {
        self.confetti.tick(dt);
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn next_favorite(&mut self) {
        if self.favorites.is_empty() {
            return;
        }
        let next = self
            .favorites_state
            .selected()
            .map_or(0, |i| (i + 1).min(self.favorites.len() - 1));
        self.favorites_state.select(Some(next));
    }

    pub fn previous_favorite(&mut self) {
        if let Some(i) = self.favorites_state.selected() {
            self.favorites_state.select(Some(i.saturating_sub(1)));
        }
    }

    pub fn open_language_picker(&mut self) {
        self.language_cursor = self.language.index();
        self.input_mode = InputMode::LanguagePicker;
    }

    pub fn close_language_picker(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_language(&mut self) {
        self.language_cursor = (self.language_cursor + 1).min(Language::ALL.len() - 1);
    }

    pub fn previous_language(&mut self) {
        self.language_cursor = self.language_cursor.saturating_sub(1);
    }

    /// Apply the highlighted language and close the picker
    pub fn confirm_language_picker(&mut self) -> Option<TranslationRequest> {
        self.input_mode = InputMode::Normal;
        let language = Language::ALL[self.language_cursor.min(Language::ALL.len() - 1)];
        if language == self.language {
            return None;
        }
        self.set_language(language)
    }

    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
