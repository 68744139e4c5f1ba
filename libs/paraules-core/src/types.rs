//! Core types for the matching game.

use serde::{Deserialize, Serialize};

/// One of the three parallel card groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Word,
    Sound,
    Image,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 3] = [Column::Word, Column::Sound, Column::Image];

    /// Get the column name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Sound => "sound",
            Self::Image => "image",
        }
    }

    /// Parse from string. Accepts the full name or its first letter.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "word" | "w" => Some(Self::Word),
            "sound" | "s" => Some(Self::Sound),
            "image" | "i" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Casing used when showing the word column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterCase {
    Upper,
    Lower,
}

impl Default for LetterCase {
    fn default() -> Self {
        Self::Upper
    }
}

impl LetterCase {
    pub fn from_uppercase(uppercase: bool) -> Self {
        if uppercase { Self::Upper } else { Self::Lower }
    }

    /// Apply this casing to a word for display.
    pub fn apply(self, word: &str) -> String {
        match self {
            Self::Upper => word.to_uppercase(),
            Self::Lower => word.to_lowercase(),
        }
    }
}

/// Identifier of a round. Strictly increasing within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A matchable item: the canonical word and the picture that stands for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub key: String,
    pub pictogram: String,
}

impl VocabularyItem {
    pub fn new(key: impl Into<String>, pictogram: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pictogram: pictogram.into(),
        }
    }
}

/// Game settings chosen at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    pub round_size: usize,
    pub round_sizes: Vec<usize>,
    pub letter_case: LetterCase,
    pub voice_preferences: Vec<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            round_size: 4,
            round_sizes: vec![4, 6, 8],
            letter_case: LetterCase::default(),
            voice_preferences: crate::feedback::voice::DEFAULT_PREFERENCES
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
        }
    }
}
