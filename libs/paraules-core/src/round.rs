//! Round selection and completion tracking.

use crate::error::ConfigurationWarning;
use crate::shuffle::shuffle;
use crate::types::{Column, RoundId};
use crate::vocabulary::Vocabulary;
use rand::Rng;
use serde::Serialize;

/// Independently shuffled card order for each column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayOrders {
    pub word: Vec<String>,
    pub sound: Vec<String>,
    pub image: Vec<String>,
}

impl DisplayOrders {
    /// Derive three fresh orders from the round's keys.
    pub fn derive<R: Rng + ?Sized>(keys: &[String], rng: &mut R) -> Self {
        Self {
            word: shuffle(keys, rng),
            sound: shuffle(keys, rng),
            image: shuffle(keys, rng),
        }
    }

    pub fn column(&self, column: Column) -> &[String] {
        match column {
            Column::Word => &self.word,
            Column::Sound => &self.sound,
            Column::Image => &self.image,
        }
    }
}

/// One round: the active keys, what has been matched, and how each column is laid out.
///
/// A round is never edited in place apart from `mark_completed`; starting a
/// new round replaces the whole value, which drops the old display orders and
/// completed set with it.
#[derive(Debug, Clone)]
pub struct Round {
    id: RoundId,
    keys: Vec<String>,
    completed: Vec<String>,
    display: DisplayOrders,
}

impl Round {
    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    pub fn display(&self) -> &DisplayOrders {
        &self.display
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn is_completed(&self, key: &str) -> bool {
        self.completed.iter().any(|k| k == key)
    }

    /// Record a matched key. Returns false if it was already matched or is
    /// not part of this round.
    pub fn mark_completed(&mut self, key: &str) -> bool {
        if !self.contains(key) || self.is_completed(key) {
            return false;
        }
        self.completed.push(key.to_string());
        true
    }

    /// Every key matched, and there was at least one.
    pub fn is_complete(&self) -> bool {
        !self.keys.is_empty() && self.completed.len() == self.keys.len()
    }

    /// (matched, total)
    pub fn progress(&self) -> (usize, usize) {
        (self.completed.len(), self.keys.len())
    }
}

/// Draws rounds from a vocabulary and remembers the parameters for regeneration.
#[derive(Debug, Clone)]
pub struct RoundManager {
    size: usize,
    last_id: RoundId,
    current: Round,
}

impl RoundManager {
    /// Create a manager and draw its first round.
    pub fn new<R: Rng + ?Sized>(
        vocabulary: &Vocabulary,
        size: usize,
        rng: &mut R,
    ) -> (Self, Option<ConfigurationWarning>) {
        let (current, warning) = start_round(vocabulary, size, RoundId(1), rng);
        let manager = Self {
            size,
            last_id: current.id,
            current,
        };
        (manager, warning)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn current(&self) -> &Round {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Round {
        &mut self.current
    }

    /// Replace the current round with a fresh draw using the same size.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        vocabulary: &Vocabulary,
        rng: &mut R,
    ) -> Option<ConfigurationWarning> {
        let (round, warning) = start_round(vocabulary, self.size, self.last_id.next(), rng);
        self.last_id = round.id;
        self.current = round;
        warning
    }

    /// Change the round size and draw a new round with it.
    pub fn set_size<R: Rng + ?Sized>(
        &mut self,
        vocabulary: &Vocabulary,
        size: usize,
        rng: &mut R,
    ) -> Option<ConfigurationWarning> {
        self.size = size;
        self.regenerate(vocabulary, rng)
    }
}

/// Draw `size` distinct items uniformly at random.
///
/// Asking for more items than the vocabulary holds clamps to what is there
/// and reports a warning; asking for zero raises the size to one.
pub fn start_round<R: Rng + ?Sized>(
    vocabulary: &Vocabulary,
    size: usize,
    id: RoundId,
    rng: &mut R,
) -> (Round, Option<ConfigurationWarning>) {
    let available = vocabulary.len();
    let (effective, warning) = if size == 0 {
        (1.min(available), Some(ConfigurationWarning::RoundSizeRaised))
    } else if size > available {
        (
            available,
            Some(ConfigurationWarning::RoundSizeClamped {
                requested: size,
                available,
            }),
        )
    } else {
        (size, None)
    };

    let mut keys = shuffle(&vocabulary.keys(), rng);
    keys.truncate(effective);
    let display = DisplayOrders::derive(&keys, rng);

    let round = Round {
        id,
        keys,
        completed: Vec::new(),
        display,
    };
    (round, warning)
}
