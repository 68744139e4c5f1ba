//! Text-to-speech backends.
//!
//! Windows and macOS use the platform engine through the `tts` crate; Linux
//! drives an `espeak-ng` (or `espeak`) child process.

pub mod espeak;
#[cfg(not(target_os = "linux"))]
pub mod tts_engine;

use paraules_core::SpeechCapability;

/// Speech backend for the current platform.
pub fn system_speech() -> Box<dyn SpeechCapability> {
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(tts_engine::TtsSpeech::new())
    }
    #[cfg(target_os = "linux")]
    {
        Box::new(espeak::EspeakSpeech::new())
    }
}
