//! Feedback description and the capabilities that play it.
//!
//! The game only describes feedback: which cue to play, what to say and in
//! which voice. Playing it is the job of an `AudioCapability` and a
//! `SpeechCapability`, both process-wide resources the runtime acquires once
//! and may find missing.

pub mod voice;

use crate::error::FeedbackError;
use serde::{Deserialize, Serialize};

/// Oscillator shape of a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Square,
}

/// A single beep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u64,
    pub waveform: Waveform,
    pub volume: f32,
}

/// A tone and when to start it, relative to the start of its cue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneStep {
    pub offset_ms: u64,
    pub tone: Tone,
}

const CUE_VOLUME: f32 = 0.05;

/// Audible answer to a resolved triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneCue {
    Success,
    Failure,
}

impl ToneCue {
    /// Success climbs, failure drops on a harsher waveform.
    pub fn steps(self) -> [ToneStep; 2] {
        match self {
            Self::Success => [
                ToneStep {
                    offset_ms: 0,
                    tone: Tone {
                        frequency_hz: 880.0,
                        duration_ms: 120,
                        waveform: Waveform::Sine,
                        volume: CUE_VOLUME,
                    },
                },
                ToneStep {
                    offset_ms: 120,
                    tone: Tone {
                        frequency_hz: 1320.0,
                        duration_ms: 120,
                        waveform: Waveform::Sine,
                        volume: CUE_VOLUME,
                    },
                },
            ],
            Self::Failure => [
                ToneStep {
                    offset_ms: 0,
                    tone: Tone {
                        frequency_hz: 200.0,
                        duration_ms: 180,
                        waveform: Waveform::Square,
                        volume: CUE_VOLUME,
                    },
                },
                ToneStep {
                    offset_ms: 180,
                    tone: Tone {
                        frequency_hz: 160.0,
                        duration_ms: 220,
                        waveform: Waveform::Square,
                        volume: CUE_VOLUME,
                    },
                },
            ],
        }
    }
}

/// A voice offered by the speech backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub language: String,
}

impl Voice {
    pub fn new(id: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language: language.into(),
        }
    }
}

/// Everything the speech backend needs to say one word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub voice_id: Option<String>,
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
}

/// Tone output device.
pub trait AudioCapability: Send {
    /// Backend identifier for logs.
    fn name(&self) -> &'static str;

    /// Open the output device. Called once before the first tone.
    fn acquire(&mut self) -> Result<(), FeedbackError>;

    /// Close the output device.
    fn release(&mut self);

    /// Start a tone and return without waiting for it to finish.
    fn play_tone(&mut self, tone: &Tone) -> Result<(), FeedbackError>;
}

/// Text-to-speech engine.
pub trait SpeechCapability: Send {
    /// Backend identifier for logs.
    fn name(&self) -> &'static str;

    fn acquire(&mut self) -> Result<(), FeedbackError>;

    fn release(&mut self);

    /// Voices currently installed. May be empty until the engine has loaded them.
    fn list_voices(&mut self) -> Result<Vec<Voice>, FeedbackError>;

    /// Start speaking and return without waiting for the end of speech.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), FeedbackError>;

    /// Stop whatever is being said.
    fn cancel(&mut self) -> Result<(), FeedbackError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_climbs_and_failure_drops() {
        let [first, second] = ToneCue::Success.steps();
        assert!(second.tone.frequency_hz > first.tone.frequency_hz);
        assert!(second.offset_ms >= first.tone.duration_ms);

        let [first, second] = ToneCue::Failure.steps();
        assert!(second.tone.frequency_hz < first.tone.frequency_hz);
        assert_eq!(first.tone.waveform, Waveform::Square);
    }

    #[test]
    fn cues_use_different_waveforms() {
        assert_ne!(
            ToneCue::Success.steps()[0].tone.waveform,
            ToneCue::Failure.steps()[0].tone.waveform
        );
    }
}
