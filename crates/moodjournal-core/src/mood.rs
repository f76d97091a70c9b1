// Sentiment keywords to colors
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;

pub const POSITIVE_KEYWORDS: [&str; 5] = ["happy", "love", "success", "joy", "inspire"];
pub const NEGATIVE_KEYWORDS: [&str; 5] = ["sad", "angry", "pain", "fail", "hate"];

/// Backgrounds a neutral quote is painted with, one picked at random
pub const NEUTRAL_BACKGROUNDS: [Color; 5] = [
    Color::rgb(0x6a11cb),
    Color::rgb(0x2575fc),
    Color::rgb(0xffb347),
    Color::rgb(0xf7971e),
    Color::rgb(0xff6ec4),
];

pub const NEUTRAL_CARD: Color = Color::rgb(0xffffff);

pub const POSITIVE_PALETTE: Palette = Palette {
    mood: Mood::Positive,
    background: Color::rgb(0x43cea2),
    card: Color::rgb(0xe0f7fa),
};

pub const NEGATIVE_PALETTE: Palette = Palette {
    mood: Mood::Negative,
    background: Color::rgb(0xff416c),
    card: Color::rgb(0xfff0f0),
};

/// What the view shows before the first quote lands
pub const INITIAL_PALETTE: Palette = Palette {
    mood: Mood::Neutral,
    background: Color::rgb(0x6a11cb),
    card: NEUTRAL_CARD,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Negative,
    Neutral,
}

impl Mood {
    /// Case-insensitive substring match; positive wins ties
    pub fn classify(text: &str) -> Mood {
        let lower = text.to_lowercase();

        if POSITIVE_KEYWORDS.iter().any(|w| lower.contains(w)) {
            Mood::Positive
        } else if NEGATIVE_KEYWORDS.iter().any(|w| lower.contains(w)) {
            Mood::Negative
        } else {
            Mood::Neutral
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mood::Positive => write!(f, "positive"),
            Mood::Negative => write!(f, "negative"),
            Mood::Neutral => write!(f, "neutral"),
        }
    }
}

/// Background and card colors derived from a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub mood: Mood,
    pub background: Color,
    pub card: Color,
}

impl Default for Palette {
    fn default() -> Self {
        INITIAL_PALETTE
    }
}

/// Pick the palette for a quote's text
pub fn colorize<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Palette {
    match Mood::classify(text) {
        Mood::Positive => POSITIVE_PALETTE,
        Mood::Negative => NEGATIVE_PALETTE,
        Mood::Neutral => Palette {
            mood: Mood::Neutral,
            background: NEUTRAL_BACKGROUNDS[rng.random_range(0..NEUTRAL_BACKGROUNDS.len())],
            card: NEUTRAL_CARD,
        },
    }
}
