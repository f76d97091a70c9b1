// Terminal UI implementation using ratatui

pub mod app;
pub mod confetti;
pub mod language_ui;
pub mod runner;
pub mod ui;

pub use app::{App, InputMode, Phase, TranslationRequest};
pub use runner::{run_tui, Services};
