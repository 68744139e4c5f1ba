//! Pending selection per column and triple-match resolution.

use crate::types::Column;
use serde::Serialize;

/// Where the resolver stands, derived from how many columns hold a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    Idle,
    Partial,
    Evaluating,
}

/// Outcome of comparing a full triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "key", rename_all = "snake_case")]
pub enum Resolution {
    Matched(String),
    Mismatched,
}

/// At most one picked key per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PendingSelection {
    pub word: Option<String>,
    pub sound: Option<String>,
    pub image: Option<String>,
}

impl PendingSelection {
    pub fn get(&self, column: Column) -> Option<&str> {
        self.slot(column).as_deref()
    }

    fn slot(&self, column: Column) -> &Option<String> {
        match column {
            Column::Word => &self.word,
            Column::Sound => &self.sound,
            Column::Image => &self.image,
        }
    }

    fn slot_mut(&mut self, column: Column) -> &mut Option<String> {
        match column {
            Column::Word => &mut self.word,
            Column::Sound => &mut self.sound,
            Column::Image => &mut self.image,
        }
    }

    pub fn state(&self) -> SelectionState {
        let filled = Column::ALL
            .iter()
            .filter(|column| self.slot(**column).is_some())
            .count();
        match filled {
            0 => SelectionState::Idle,
            3 => SelectionState::Evaluating,
            _ => SelectionState::Partial,
        }
    }

    /// Pick `key` in `column`, or drop it if that column already held it.
    pub fn toggle(&mut self, column: Column, key: &str) {
        let slot = self.slot_mut(column);
        if slot.as_deref() == Some(key) {
            *slot = None;
        } else {
            *slot = Some(key.to_string());
        }
    }

    /// If every column holds a pick, take all three and leave the selection empty.
    pub fn take_triple(&mut self) -> Option<[String; 3]> {
        if self.state() != SelectionState::Evaluating {
            return None;
        }
        let taken = std::mem::take(self);
        match (taken.word, taken.sound, taken.image) {
            (Some(word), Some(sound), Some(image)) => Some([word, sound, image]),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.state() == SelectionState::Idle
    }
}

/// All three picks must name the same item; two out of three is a miss.
pub fn resolve(triple: &[String; 3]) -> Resolution {
    let [word, sound, image] = triple;
    if word == sound && word == image {
        Resolution::Matched(word.clone())
    } else {
        Resolution::Mismatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn triple(word: &str, sound: &str, image: &str) -> [String; 3] {
        [word.to_string(), sound.to_string(), image.to_string()]
    }

    #[test]
    fn states_follow_filled_slots() {
        let mut pending = PendingSelection::default();
        assert_eq!(pending.state(), SelectionState::Idle);
        pending.toggle(Column::Word, "gos");
        assert_eq!(pending.state(), SelectionState::Partial);
        pending.toggle(Column::Image, "gat");
        assert_eq!(pending.state(), SelectionState::Partial);
        pending.toggle(Column::Sound, "sol");
        assert_eq!(pending.state(), SelectionState::Evaluating);
    }

    #[test]
    fn same_key_twice_toggles_off() {
        let mut pending = PendingSelection::default();
        pending.toggle(Column::Sound, "gos");
        pending.toggle(Column::Sound, "gos");
        assert!(pending.is_empty());
        assert_eq!(pending.get(Column::Sound), None);
    }

    #[test]
    fn different_key_replaces_pick() {
        let mut pending = PendingSelection::default();
        pending.toggle(Column::Word, "gos");
        pending.toggle(Column::Word, "gat");
        assert_eq!(pending.get(Column::Word), Some("gat"));
    }

    #[test]
    fn take_triple_only_when_full_and_clears() {
        let mut pending = PendingSelection::default();
        pending.toggle(Column::Word, "gos");
        pending.toggle(Column::Sound, "gos");
        assert_eq!(pending.take_triple(), None);
        assert_eq!(pending.get(Column::Word), Some("gos"));

        pending.toggle(Column::Image, "gos");
        assert_eq!(pending.take_triple(), Some(triple("gos", "gos", "gos")));
        assert!(pending.is_empty());
    }

    #[test]
    fn resolve_requires_all_three() {
        assert_eq!(
            resolve(&triple("gos", "gos", "gos")),
            Resolution::Matched("gos".to_string())
        );
        assert_eq!(resolve(&triple("gos", "gat", "sol")), Resolution::Mismatched);
        assert_eq!(resolve(&triple("gos", "gos", "sol")), Resolution::Mismatched);
        assert_eq!(resolve(&triple("sol", "gos", "gos")), Resolution::Mismatched);
    }
}
