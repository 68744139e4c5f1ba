//! Game state and the reducer that drives it.
//!
//! Every change goes through `Game::dispatch`: one event in, a list of
//! effects out. The runtime feeds events in arrival order and carries out the
//! effects (tones, speech, timers) without the game ever waiting on them.

use crate::celebration::{Celebration, CELEBRATION_DURATION};
use crate::error::ConfigurationWarning;
use crate::feedback::ToneCue;
use crate::round::{Round, RoundManager};
use crate::selection::{resolve, PendingSelection, Resolution};
use crate::types::{Column, GameSettings, LetterCase, RoundId};
use crate::view::GameView;
use crate::vocabulary::Vocabulary;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Input to the game, from the player or from an expired timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SelectCard { column: Column, key: String },
    StartNewRound,
    SetRoundSize { size: usize },
    SetCase { case: LetterCase },
    CelebrationExpired { round: RoundId },
}

/// Side effect requested by the game. None of them feed back into state
/// except `ScheduleCelebrationClear`, which comes back as an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    PlayCue { cue: ToneCue },
    Speak { text: String },
    ScheduleCelebrationClear { round: RoundId, after: Duration },
    Warn { warning: ConfigurationWarning },
}

/// Complete state of one game session.
#[derive(Debug, Clone)]
pub struct Game {
    vocabulary: Vocabulary,
    rounds: RoundManager,
    pending: PendingSelection,
    celebration: Celebration,
    letter_case: LetterCase,
    round_sizes: Vec<usize>,
}

impl Game {
    /// Start a session with its first round already drawn.
    pub fn new<R: Rng + ?Sized>(
        vocabulary: Vocabulary,
        settings: &GameSettings,
        rng: &mut R,
    ) -> (Self, Vec<Effect>) {
        let (rounds, warning) = RoundManager::new(&vocabulary, settings.round_size, rng);
        let mut effects = warn(not_offered(settings.round_size, &settings.round_sizes));
        effects.extend(warn(warning));
        let game = Self {
            vocabulary,
            rounds,
            pending: PendingSelection::default(),
            celebration: Celebration::default(),
            letter_case: settings.letter_case,
            round_sizes: settings.round_sizes.clone(),
        };
        (game, effects)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn round(&self) -> &Round {
        self.rounds.current()
    }

    pub fn round_size(&self) -> usize {
        self.rounds.size()
    }

    pub fn pending(&self) -> &PendingSelection {
        &self.pending
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_active()
    }

    pub fn letter_case(&self) -> LetterCase {
        self.letter_case
    }

    /// Round sizes offered to the player.
    pub fn round_sizes(&self) -> &[usize] {
        &self.round_sizes
    }

    /// Read-only snapshot for rendering.
    pub fn view(&self) -> GameView {
        GameView::build(self)
    }

    /// Apply one event and return the effects it asks for.
    pub fn dispatch<R: Rng + ?Sized>(&mut self, event: Event, rng: &mut R) -> Vec<Effect> {
        match event {
            Event::SelectCard { column, key } => self.apply_selection(column, &key),
            Event::StartNewRound => self.apply_round_start(None, rng),
            Event::SetRoundSize { size } => self.apply_round_start(Some(size), rng),
            Event::SetCase { case } => {
                self.letter_case = case;
                Vec::new()
            }
            Event::CelebrationExpired { round } => {
                self.celebration.expire(round);
                Vec::new()
            }
        }
    }

    fn apply_round_start<R: Rng + ?Sized>(&mut self, size: Option<usize>, rng: &mut R) -> Vec<Effect> {
        let mut effects = Vec::new();
        let warning = match size {
            Some(size) => {
                effects.extend(warn(not_offered(size, &self.round_sizes)));
                self.rounds.set_size(&self.vocabulary, size, rng)
            }
            None => self.rounds.regenerate(&self.vocabulary, rng),
        };
        self.pending.clear();
        effects.extend(warn(warning));
        effects
    }

    fn apply_selection(&mut self, column: Column, key: &str) -> Vec<Effect> {
        let round = self.rounds.current();
        if !round.contains(key) || round.is_completed(key) {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if column == Column::Sound {
            effects.push(Effect::Speak {
                text: key.to_string(),
            });
        }

        self.pending.toggle(column, key);
        if let Some(triple) = self.pending.take_triple() {
            effects.extend(self.apply_resolution(resolve(&triple)));
        }
        effects
    }

    fn apply_resolution(&mut self, resolution: Resolution) -> Vec<Effect> {
        match resolution {
            Resolution::Matched(key) => {
                let round = self.rounds.current_mut();
                let was_complete = round.is_complete();
                round.mark_completed(&key);

                let mut effects = vec![Effect::PlayCue {
                    cue: ToneCue::Success,
                }];
                let round_id = round.id();
                if !was_complete && round.is_complete() && self.celebration.trigger(round_id) {
                    effects.push(Effect::ScheduleCelebrationClear {
                        round: round_id,
                        after: CELEBRATION_DURATION,
                    });
                }
                effects
            }
            Resolution::Mismatched => vec![Effect::PlayCue {
                cue: ToneCue::Failure,
            }],
        }
    }
}

/// Sizes outside the offered list are still played, just reported.
/// An empty list offers everything.
fn not_offered(size: usize, offered: &[usize]) -> Option<ConfigurationWarning> {
    if offered.is_empty() || offered.contains(&size) {
        return None;
    }
    Some(ConfigurationWarning::RoundSizeNotOffered {
        requested: size,
        offered: offered.to_vec(),
    })
}

fn warn(warning: Option<ConfigurationWarning>) -> Vec<Effect> {
    warning
        .map(|warning| Effect::Warn { warning })
        .into_iter()
        .collect()
}
