//! Speech through an espeak child process.

use paraules_core::{FeedbackError, SpeechCapability, Utterance, Voice};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::debug;

const PROGRAMS: &[&str] = &["espeak-ng", "espeak"];
const NORMAL_WPM: f32 = 175.0;
const NORMAL_PITCH: f32 = 50.0;

/// espeak-backed speech. The voice list is read on a background thread after
/// `acquire`, so it starts out empty.
#[derive(Default)]
pub struct EspeakSpeech {
    program: Option<&'static str>,
    voices: Arc<Mutex<Vec<Voice>>>,
    child: Option<Child>,
}

impl EspeakSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    fn program(&self) -> Result<&'static str, FeedbackError> {
        self.program
            .ok_or(FeedbackError::CapabilityUnavailable("speech"))
    }
}

impl SpeechCapability for EspeakSpeech {
    fn name(&self) -> &'static str {
        self.program.unwrap_or("espeak")
    }

    fn acquire(&mut self) -> Result<(), FeedbackError> {
        let program = PROGRAMS
            .iter()
            .copied()
            .find(|program| {
                Command::new(program)
                    .arg("--version")
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .map(|status| status.success())
                    .unwrap_or(false)
            })
            .ok_or(FeedbackError::CapabilityUnavailable("speech"))?;
        self.program = Some(program);

        let voices = Arc::clone(&self.voices);
        thread::spawn(move || {
            let output = match Command::new(program).arg("--voices").output() {
                Ok(output) => output,
                Err(e) => {
                    debug!(error = %e, "espeak voice listing failed");
                    return;
                }
            };
            let listed = parse_voices(&String::from_utf8_lossy(&output.stdout));
            debug!(count = listed.len(), "espeak voices loaded");
            if let Ok(mut voices) = voices.lock() {
                *voices = listed;
            }
        });
        Ok(())
    }

    fn release(&mut self) {
        let _ = self.cancel();
        self.program = None;
    }

    fn list_voices(&mut self) -> Result<Vec<Voice>, FeedbackError> {
        self.voices
            .lock()
            .map(|voices| voices.clone())
            .map_err(|_| FeedbackError::Backend("voice list lock poisoned".into()))
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), FeedbackError> {
        let program = self.program()?;
        let voice = utterance
            .voice_id
            .clone()
            .unwrap_or_else(|| primary_language(&utterance.language));

        let child = Command::new(program)
            .args(speak_args(&voice, utterance))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| FeedbackError::Backend(e.to_string()))?;
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), FeedbackError> {
        if let Some(mut child) = self.child.take() {
            if matches!(child.try_wait(), Ok(None)) {
                child
                    .kill()
                    .map_err(|e| FeedbackError::Backend(e.to_string()))?;
            }
            let _ = child.wait();
        }
        Ok(())
    }
}

/// `ca-ES` -> `ca`, the form espeak lists its voices under.
fn primary_language(tag: &str) -> String {
    tag.split(['-', '_'])
        .next()
        .unwrap_or(tag)
        .trim()
        .to_lowercase()
}

fn speak_args(voice: &str, utterance: &Utterance) -> Vec<String> {
    let words_per_minute = (NORMAL_WPM * utterance.rate).round() as u32;
    let pitch = (NORMAL_PITCH * utterance.pitch).round().clamp(0.0, 99.0) as u32;
    vec![
        "-v".to_string(),
        voice.to_string(),
        "-s".to_string(),
        words_per_minute.to_string(),
        "-p".to_string(),
        pitch.to_string(),
        "--".to_string(),
        utterance.text.clone(),
    ]
}

/// Parse the table printed by `espeak --voices`.
///
/// The language column doubles as the voice id, since `-v` accepts it.
pub fn parse_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|line| {
            let mut columns = line.split_whitespace();
            let _priority = columns.next()?;
            let language = columns.next()?;
            Some(Voice::new(language, language))
        })
        .collect()
}
