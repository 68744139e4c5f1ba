//! Common test utilities for engine integration tests.
//!
//! This module provides:
//! - Recording fakes for the audio and speech capabilities
//! - TestContext, which runs a real engine over those fakes

pub mod fixtures;

use std::sync::{Arc, Mutex};

use paraules_core::types::Column;
use paraules_core::{
    AudioCapability, FeedbackError, Game, GameSettings, GameView, SpeechCapability, Tone,
    Utterance, Voice, Vocabulary,
};
use paraules_player::engine::{Engine, EngineHandle};
use paraules_player::feedback::FeedbackEmitter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A tone as the fake device received it.
#[derive(Debug, Clone)]
pub struct PlayedTone {
    pub at: Instant,
    pub tone: Tone,
}

/// Audio capability that records every tone.
pub struct RecordingAudio {
    available: bool,
    played: Arc<Mutex<Vec<PlayedTone>>>,
}

impl AudioCapability for RecordingAudio {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn acquire(&mut self) -> Result<(), FeedbackError> {
        if self.available {
            Ok(())
        } else {
            Err(FeedbackError::CapabilityUnavailable("audio"))
        }
    }

    fn release(&mut self) {}

    fn play_tone(&mut self, tone: &Tone) -> Result<(), FeedbackError> {
        self.played.lock().unwrap().push(PlayedTone {
            at: Instant::now(),
            tone: *tone,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechCall {
    Cancel,
    Speak(Utterance),
}

/// Speech capability with a voice list the test can change at any time.
pub struct FakeSpeech {
    voices: Arc<Mutex<Vec<Voice>>>,
    calls: Arc<Mutex<Vec<SpeechCall>>>,
}

impl SpeechCapability for FakeSpeech {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn acquire(&mut self) -> Result<(), FeedbackError> {
        Ok(())
    }

    fn release(&mut self) {}

    fn list_voices(&mut self) -> Result<Vec<Voice>, FeedbackError> {
        Ok(self.voices.lock().unwrap().clone())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), FeedbackError> {
        self.calls
            .lock()
            .unwrap()
            .push(SpeechCall::Speak(utterance.clone()));
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), FeedbackError> {
        self.calls.lock().unwrap().push(SpeechCall::Cancel);
        Ok(())
    }
}

/// Which fakes to plug in.
pub struct Capabilities {
    pub audio: bool,
    pub speech: bool,
    pub voices: Vec<Voice>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            audio: true,
            speech: true,
            voices: vec![],
        }
    }
}

/// A running engine plus handles onto its fakes.
pub struct TestContext {
    pub handle: EngineHandle,
    played: Arc<Mutex<Vec<PlayedTone>>>,
    calls: Arc<Mutex<Vec<SpeechCall>>>,
    voices: Arc<Mutex<Vec<Voice>>>,
    task: JoinHandle<()>,
}

impl TestContext {
    /// Engine over exactly `keys`, one round containing all of them.
    pub fn start(keys: &[&str]) -> Self {
        Self::start_with(
            fixtures::vocabulary(keys),
            fixtures::settings(keys.len()),
            Capabilities::default(),
        )
    }

    pub fn start_with(
        vocabulary: Vocabulary,
        settings: GameSettings,
        capabilities: Capabilities,
    ) -> Self {
        let played = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(Mutex::new(Vec::new()));
        let voices = Arc::new(Mutex::new(capabilities.voices));

        let audio: Box<dyn AudioCapability> = Box::new(RecordingAudio {
            available: capabilities.audio,
            played: played.clone(),
        });
        let speech: Option<Box<dyn SpeechCapability>> = if capabilities.speech {
            Some(Box::new(FakeSpeech {
                voices: voices.clone(),
                calls: calls.clone(),
            }))
        } else {
            None
        };

        let mut rng = StdRng::seed_from_u64(7);
        let (game, _) = Game::new(vocabulary, &settings, &mut rng);
        let feedback =
            FeedbackEmitter::acquire(Some(audio), speech, settings.voice_preferences.clone());
        let (engine, handle) = Engine::new(game, rng, feedback);
        let task = engine.spawn();

        Self {
            handle,
            played,
            calls,
            voices,
            task,
        }
    }

    pub fn pick(&self, column: Column, key: &str) {
        self.handle.select_card(column, key).unwrap();
    }

    pub fn pick_triple(&self, word: &str, sound: &str, image: &str) {
        self.pick(Column::Word, word);
        self.pick(Column::Sound, sound);
        self.pick(Column::Image, image);
    }

    /// View after every message sent so far has been handled.
    pub async fn view(&self) -> GameView {
        self.handle.snapshot().await.unwrap()
    }

    pub fn tones(&self) -> Vec<PlayedTone> {
        self.played.lock().unwrap().clone()
    }

    pub fn speech_calls(&self) -> Vec<SpeechCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.speech_calls()
            .into_iter()
            .filter_map(|call| match call {
                SpeechCall::Speak(utterance) => Some(utterance),
                SpeechCall::Cancel => None,
            })
            .collect()
    }

    pub fn set_voices(&self, voices: Vec<Voice>) {
        *self.voices.lock().unwrap() = voices;
    }

    pub async fn stop(self) {
        self.handle.shutdown().unwrap();
        self.task.await.unwrap();
    }
}
