use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::Language;

/// Main configuration structure
///
/// Loaded from the config file; the CLI layers env vars and flags on top.
/// Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file means defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// `<config dir>/moodjournal/config.toml`
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("moodjournal");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Where the quote list comes from
    #[serde(default = "default_quotes_url")]
    pub quotes_url: String,

    #[serde(default = "default_translate_url")]
    pub translate_url: String,

    /// CORS relay prefix; empty string calls the services directly
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Connect timeout for both services
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_quotes_url() -> String {
    moodjournal_api::TYPE_FIT_QUOTES_URL.to_string()
}

fn default_translate_url() -> String {
    moodjournal_api::GOOGLE_TRANSLATE_URL.to_string()
}

fn default_relay_url() -> String {
    moodjournal_api::DEFAULT_RELAY.to_string()
}

fn default_timeout_secs() -> u64 {
    moodjournal_api::DEFAULT_TIMEOUT_SECS
}

impl EndpointConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            quotes_url: default_quotes_url(),
            translate_url: default_translate_url(),
            relay_url: default_relay_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Language the journal starts in
    #[serde(default)]
    pub language: Language,

    /// Play the confetti burst on every new quote
    #[serde(default = "default_confetti")]
    pub confetti: bool,

    /// Animation frame interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_confetti() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    50
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            confetti: default_confetti(),
            tick_ms: default_tick_ms(),
        }
    }
}
