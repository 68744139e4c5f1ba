//! Round-complete celebration flag.

use crate::types::RoundId;
use std::time::Duration;

/// How long the flag stays up once a round is finished.
pub const CELEBRATION_DURATION: Duration = Duration::from_millis(1800);

/// Transient "round complete" flag that fires at most once per round.
#[derive(Debug, Clone, Default)]
pub struct Celebration {
    active: bool,
    fired_for: Option<RoundId>,
}

impl Celebration {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Raise the flag for `round`. Returns false if this round already celebrated.
    pub fn trigger(&mut self, round: RoundId) -> bool {
        if self.fired_for == Some(round) {
            return false;
        }
        self.fired_for = Some(round);
        self.active = true;
        true
    }

    /// Lower the flag if the expiry belongs to the round that raised it.
    ///
    /// Expiries from older rounds are dropped; returns whether the flag changed.
    pub fn expire(&mut self, round: RoundId) -> bool {
        if self.fired_for != Some(round) || !self.active {
            return false;
        }
        self.active = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_round() {
        let mut celebration = Celebration::default();
        assert!(celebration.trigger(RoundId(1)));
        assert!(!celebration.trigger(RoundId(1)));
        assert!(celebration.is_active());
    }

    #[test]
    fn expiry_clears_flag() {
        let mut celebration = Celebration::default();
        celebration.trigger(RoundId(1));
        assert!(celebration.expire(RoundId(1)));
        assert!(!celebration.is_active());
        assert!(!celebration.expire(RoundId(1)));
    }

    #[test]
    fn stale_expiry_is_ignored() {
        let mut celebration = Celebration::default();
        celebration.trigger(RoundId(1));
        celebration.trigger(RoundId(2));
        assert!(!celebration.expire(RoundId(1)));
        assert!(celebration.is_active());
        assert!(celebration.expire(RoundId(2)));
    }

    #[test]
    fn next_round_can_celebrate_again() {
        let mut celebration = Celebration::default();
        celebration.trigger(RoundId(1));
        celebration.expire(RoundId(1));
        assert!(celebration.trigger(RoundId(2)));
    }
}
