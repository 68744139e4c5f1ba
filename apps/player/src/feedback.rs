//! Plays tone cues and speech through whatever capabilities are present.

use paraules_core::feedback::voice::VoiceSelector;
use paraules_core::{AudioCapability, FeedbackError, SpeechCapability, Tone, ToneCue};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

type SharedAudio = Arc<Mutex<Box<dyn AudioCapability>>>;

/// Fire-and-forget feedback. Nothing here blocks the caller or reports
/// failure back; a missing or failing backend just means silence.
pub struct FeedbackEmitter {
    audio: Option<SharedAudio>,
    speech: Option<Box<dyn SpeechCapability>>,
    voices: VoiceSelector,
}

impl FeedbackEmitter {
    /// Acquire both capabilities, keeping whichever ones come up.
    pub fn acquire(
        audio: Option<Box<dyn AudioCapability>>,
        speech: Option<Box<dyn SpeechCapability>>,
        preferences: Vec<String>,
    ) -> Self {
        let audio = audio.and_then(|mut audio| match audio.acquire() {
            Ok(()) => {
                info!(backend = audio.name(), "audio ready");
                Some(Arc::new(Mutex::new(audio)))
            }
            Err(e) => {
                warn!(backend = audio.name(), error = %e, "audio unavailable, tones disabled");
                None
            }
        });

        let speech = speech.and_then(|mut speech| match speech.acquire() {
            Ok(()) => {
                info!(backend = speech.name(), "speech ready");
                Some(speech)
            }
            Err(e) => {
                warn!(backend = speech.name(), error = %e, "speech unavailable, pronunciation disabled");
                None
            }
        });

        let mut emitter = Self {
            audio,
            speech,
            voices: VoiceSelector::new(preferences),
        };
        emitter.refresh_voices();
        emitter
    }

    /// Emitter with no capabilities at all.
    pub fn silent(preferences: Vec<String>) -> Self {
        Self::acquire(None, None, preferences)
    }

    pub fn voices(&self) -> &VoiceSelector {
        &self.voices
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn has_speech(&self) -> bool {
        self.speech.is_some()
    }

    /// Play both tones of a cue. The first starts now, later ones on timers.
    ///
    /// Must be called from within a tokio runtime when the cue has delayed steps.
    pub fn play_cue(&self, cue: ToneCue) {
        let Some(audio) = &self.audio else {
            debug!(?cue, "no audio, cue skipped");
            return;
        };

        for step in cue.steps() {
            if step.offset_ms == 0 {
                play_tone(audio, &step.tone);
            } else {
                let audio = Arc::clone(audio);
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(step.offset_ms)).await;
                    play_tone(&audio, &step.tone);
                });
            }
        }
    }

    /// Say `text`, cutting off anything still being said.
    pub fn speak(&mut self, text: &str) {
        if self.speech.is_none() {
            debug!(text, "no speech, pronunciation skipped");
            return;
        }
        if !self.voices.is_ready() {
            self.refresh_voices();
        }

        let utterance = self.voices.utterance(text);
        let Some(speech) = self.speech.as_mut() else {
            return;
        };
        if let Err(e) = speech.cancel() {
            debug!(error = %e, "cancel before speak failed");
        }
        match speech.speak(&utterance) {
            Ok(()) => debug!(
                text,
                voice = utterance.voice_id.as_deref().unwrap_or("-"),
                language = %utterance.language,
                "speaking"
            ),
            Err(e) => warn!(text, error = %e, "speech failed"),
        }
    }

    /// Ask the speech backend for its voices and reselect if the list changed.
    pub fn refresh_voices(&mut self) {
        let Some(speech) = self.speech.as_mut() else {
            return;
        };
        let voices = match speech.list_voices() {
            Ok(voices) => voices,
            Err(e) => {
                debug!(error = %e, "voice list unavailable");
                return;
            }
        };
        if self.voices.update(voices) {
            match self.voices.selected() {
                Some(voice) => info!(voice = %voice.id, language = %voice.language, "voice selected"),
                None => info!(language = self.voices.default_language(), "no voices yet"),
            }
        }
    }

    /// Give both capabilities back.
    pub fn release(&mut self) {
        if let Some(audio) = self.audio.take() {
            if let Ok(mut audio) = audio.lock() {
                audio.release();
            }
        }
        if let Some(mut speech) = self.speech.take() {
            let _ = speech.cancel();
            speech.release();
        }
    }
}

fn play_tone(audio: &SharedAudio, tone: &Tone) {
    let result = match audio.lock() {
        Ok(mut audio) => audio.play_tone(tone),
        Err(_) => Err(FeedbackError::Backend("audio lock poisoned".into())),
    };
    if let Err(e) = result {
        warn!(frequency = tone.frequency_hz, error = %e, "tone failed");
    }
}
