//! Core game library for the word / sound / picture matching game.
//!
//! Provides:
//! - Vocabulary store and its line-prefix file format
//! - Fisher-Yates shuffler over an injected random source
//! - Round manager, selection resolver and celebration trigger
//! - Feedback description (tone cues, voice selection) and capability traits
//! - A single `Game::dispatch` reducer that turns events into effects

pub mod celebration;
pub mod error;
pub mod feedback;
pub mod game;
pub mod round;
pub mod selection;
pub mod shuffle;
pub mod types;
pub mod view;
pub mod vocabulary;

pub use celebration::{Celebration, CELEBRATION_DURATION};
pub use error::{ConfigurationWarning, FeedbackError, Result, VocabularyError};
pub use feedback::voice::{select_voice, VoiceCatalog, VoiceSelector};
pub use feedback::{
    AudioCapability, SpeechCapability, Tone, ToneCue, ToneStep, Utterance, Voice,
    Waveform,
};
pub use game::{Effect, Event, Game};
pub use round::{DisplayOrders, Round, RoundManager};
pub use selection::{resolve, PendingSelection, Resolution, SelectionState};
pub use shuffle::shuffle;
pub use types::{Column, GameSettings, LetterCase, RoundId, VocabularyItem};
pub use view::{CardFace, CardView, ColumnView, GameView};
pub use vocabulary::Vocabulary;
