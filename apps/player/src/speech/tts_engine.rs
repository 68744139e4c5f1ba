//! Speech through the platform engine (SAPI / WinRT, AVFoundation).

use paraules_core::{FeedbackError, SpeechCapability, Utterance, Voice};

fn backend_error(e: tts::Error) -> FeedbackError {
    FeedbackError::Backend(e.to_string())
}

#[derive(Default)]
pub struct TtsSpeech {
    tts: Option<tts::Tts>,
}

impl TtsSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    fn engine(&mut self) -> Result<&mut tts::Tts, FeedbackError> {
        self.tts
            .as_mut()
            .ok_or(FeedbackError::CapabilityUnavailable("speech"))
    }
}

impl SpeechCapability for TtsSpeech {
    fn name(&self) -> &'static str {
        "tts"
    }

    fn acquire(&mut self) -> Result<(), FeedbackError> {
        if self.tts.is_none() {
            self.tts = Some(tts::Tts::default().map_err(backend_error)?);
        }
        Ok(())
    }

    fn release(&mut self) {
        self.tts = None;
    }

    fn list_voices(&mut self) -> Result<Vec<Voice>, FeedbackError> {
        let voices = self.engine()?.voices().map_err(backend_error)?;
        Ok(voices
            .iter()
            .map(|voice| Voice::new(voice.id(), voice.language().to_string()))
            .collect())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), FeedbackError> {
        let engine = self.engine()?;

        if let Some(id) = &utterance.voice_id {
            let voice = engine
                .voices()
                .map_err(backend_error)?
                .into_iter()
                .find(|voice| &voice.id() == id);
            if let Some(voice) = voice {
                engine.set_voice(&voice).map_err(backend_error)?;
            }
        }

        let rate = (engine.normal_rate() * utterance.rate).clamp(engine.min_rate(), engine.max_rate());
        engine.set_rate(rate).map_err(backend_error)?;
        let pitch =
            (engine.normal_pitch() * utterance.pitch).clamp(engine.min_pitch(), engine.max_pitch());
        engine.set_pitch(pitch).map_err(backend_error)?;

        engine
            .speak(utterance.text.as_str(), true)
            .map_err(backend_error)?;
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), FeedbackError> {
        if let Some(engine) = self.tts.as_mut() {
            engine.stop().map_err(backend_error)?;
        }
        Ok(())
    }
}
