//! Voice selection against a language preference list.

use super::{Utterance, Voice};
use serde::Serialize;

/// Preferred languages, best first.
pub const DEFAULT_PREFERENCES: &[&str] = &["ca-ES", "ca", "es-ES", "es"];

/// Used when there is no preference list at all.
pub const FALLBACK_LANGUAGE: &str = "ca-ES";

/// A touch slower than normal speech.
pub const SPEECH_RATE: f32 = 0.9;
pub const SPEECH_PITCH: f32 = 1.0;

/// What the speech backend has told us about its voices so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "voices", rename_all = "snake_case")]
pub enum VoiceCatalog {
    #[default]
    NotReady,
    Ready(Vec<Voice>),
}

/// Pick the first voice whose language starts with a preference, scanning
/// preferences in order, else the first voice available.
///
/// Matching ignores case and treats `_` like `-`, so `es` matches `es-MX`
/// and `ca-es` matches `ca_ES`.
pub fn select_voice<'a>(preferences: &[String], voices: &'a [Voice]) -> Option<&'a Voice> {
    preferences
        .iter()
        .find_map(|preference| {
            let preference = normalize_tag(preference);
            voices
                .iter()
                .find(|voice| normalize_tag(&voice.language).starts_with(&preference))
        })
        .or_else(|| voices.first())
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_lowercase()
}

/// Cached voice choice that follows changes in the backend's voice list.
#[derive(Debug, Clone)]
pub struct VoiceSelector {
    preferences: Vec<String>,
    catalog: VoiceCatalog,
    selected: Option<Voice>,
}

impl VoiceSelector {
    pub fn new(preferences: Vec<String>) -> Self {
        Self {
            preferences,
            catalog: VoiceCatalog::NotReady,
            selected: None,
        }
    }

    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn selected(&self) -> Option<&Voice> {
        self.selected.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.catalog, VoiceCatalog::Ready(_))
    }

    /// Take a fresh voice list from the backend.
    ///
    /// An empty list keeps the catalog `NotReady`. Returns true when the
    /// catalog changed, in which case the selection has been recomputed.
    pub fn update(&mut self, voices: Vec<Voice>) -> bool {
        let catalog = if voices.is_empty() {
            VoiceCatalog::NotReady
        } else {
            VoiceCatalog::Ready(voices)
        };
        if catalog == self.catalog {
            return false;
        }
        self.catalog = catalog;
        self.selected = match &self.catalog {
            VoiceCatalog::Ready(voices) => select_voice(&self.preferences, voices).cloned(),
            VoiceCatalog::NotReady => None,
        };
        true
    }

    /// Language used when no voice has been resolved yet.
    pub fn default_language(&self) -> &str {
        self.preferences
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_LANGUAGE)
    }

    /// Build the utterance for `text` with the current voice, or with just
    /// the default language while no voice is known.
    pub fn utterance(&self, text: &str) -> Utterance {
        let (voice_id, language) = match &self.selected {
            Some(voice) => (Some(voice.id.clone()), voice.language.clone()),
            None => (None, self.default_language().to_string()),
        };
        Utterance {
            text: text.to_string(),
            voice_id,
            language,
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
        }
    }
}

impl Default for VoiceSelector {
    fn default() -> Self {
        Self::new(DEFAULT_PREFERENCES.iter().map(|tag| tag.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prefs() -> Vec<String> {
        DEFAULT_PREFERENCES.iter().map(|tag| tag.to_string()).collect()
    }

    #[test]
    fn prefix_match_on_language() {
        let voices = vec![Voice::new("mx", "es-MX"), Voice::new("us", "en-US")];
        assert_eq!(select_voice(&prefs(), &voices), Some(&voices[0]));
    }

    #[test]
    fn earlier_preference_wins_over_list_order() {
        let voices = vec![
            Voice::new("es", "es-ES"),
            Voice::new("ca", "CA-es"),
        ];
        assert_eq!(select_voice(&prefs(), &voices).map(|v| v.id.as_str()), Some("ca"));
    }

    #[test]
    fn underscore_tags_match() {
        let voices = vec![Voice::new("de", "de_DE"), Voice::new("ca", "ca_ES")];
        assert_eq!(select_voice(&prefs(), &voices).map(|v| v.id.as_str()), Some("ca"));
    }

    #[test]
    fn falls_back_to_first_voice() {
        let voices = vec![Voice::new("de", "de-DE"), Voice::new("fr", "fr-FR")];
        assert_eq!(select_voice(&prefs(), &voices), Some(&voices[0]));
        assert_eq!(select_voice(&prefs(), &[]), None);
    }

    #[test]
    fn no_voices_speaks_with_default_language() {
        let selector = VoiceSelector::default();
        let utterance = selector.utterance("gos");
        assert_eq!(utterance.voice_id, None);
        assert_eq!(utterance.language, "ca-ES");
        assert_eq!(utterance.rate, SPEECH_RATE);
    }

    #[test]
    fn voices_arriving_later_are_picked_up() {
        let mut selector = VoiceSelector::default();
        assert_eq!(selector.preferences(), prefs().as_slice());
        assert!(!selector.update(vec![]));
        assert!(!selector.is_ready());
        assert_eq!(selector.catalog(), &VoiceCatalog::NotReady);

        let voices = vec![Voice::new("mx", "es-MX"), Voice::new("us", "en-US")];
        assert!(selector.update(voices.clone()));
        assert!(selector.is_ready());
        assert_eq!(selector.catalog(), &VoiceCatalog::Ready(voices));
        let utterance = selector.utterance("gat");
        assert_eq!(utterance.voice_id.as_deref(), Some("mx"));
        assert_eq!(utterance.language, "es-MX");
    }

    #[test]
    fn unchanged_list_is_not_a_change() {
        let mut selector = VoiceSelector::default();
        let voices = vec![Voice::new("mx", "es-MX")];
        assert!(selector.update(voices.clone()));
        assert!(!selector.update(voices));
    }

    #[test]
    fn list_change_reselects() {
        let mut selector = VoiceSelector::default();
        selector.update(vec![Voice::new("mx", "es-MX")]);
        selector.update(vec![Voice::new("mx", "es-MX"), Voice::new("ca", "ca-ES")]);
        assert_eq!(selector.selected().map(|v| v.id.as_str()), Some("ca"));
    }

    #[test]
    fn empty_preferences_use_fallback_language() {
        let selector = VoiceSelector::new(vec![]);
        assert_eq!(selector.default_language(), FALLBACK_LANGUAGE);
    }
}
