//! Test fixtures and factory functions.

use paraules_core::{GameSettings, Voice, Vocabulary, VocabularyItem};

/// Vocabulary with the given words, each pictured by "?".
pub fn vocabulary(keys: &[&str]) -> Vocabulary {
    Vocabulary::new(keys.iter().map(|key| VocabularyItem::new(*key, "?")).collect())
        .expect("fixture vocabulary")
}

/// Default settings with the given round size.
pub fn settings(round_size: usize) -> GameSettings {
    GameSettings {
        round_size,
        ..Default::default()
    }
}

/// Vocabulary file content with `count` generated words.
pub fn vocabulary_file(count: usize) -> String {
    (0..count)
        .map(|i| format!("W: paraula{}\nP: #{}\n", i + 1, i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn voice(id: &str, language: &str) -> Voice {
    Voice::new(id, language)
}
