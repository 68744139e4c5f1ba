//! Tone output through rodio.
//!
//! The output stream lives on its own thread for as long as the capability is
//! held; tones are sent to it over a channel and mixed in as finite sources,
//! so each one stops by itself once its duration has played.

use paraules_core::{AudioCapability, FeedbackError, Tone, Waveform};
use rodio::{OutputStream, Source};
use std::f32::consts::TAU;
use std::sync::mpsc::{channel, Sender};
use std::thread;
use std::time::Duration;
use tracing::debug;

const SAMPLE_RATE: u32 = 44_100;

/// Finite single-channel oscillator.
#[derive(Debug, Clone)]
pub struct Oscillator {
    frequency: f32,
    waveform: Waveform,
    volume: f32,
    total_samples: usize,
    position: usize,
}

impl Oscillator {
    pub fn new(tone: &Tone) -> Self {
        Self {
            frequency: tone.frequency_hz,
            waveform: tone.waveform,
            volume: tone.volume.clamp(0.0, 1.0),
            total_samples: (SAMPLE_RATE as u64 * tone.duration_ms / 1000) as usize,
            position: 0,
        }
    }
}

impl Iterator for Oscillator {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.total_samples {
            return None;
        }
        let phase = (self.position as f32 * self.frequency / SAMPLE_RATE as f32).fract();
        self.position += 1;

        let value = match self.waveform {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        };
        Some(value * self.volume)
    }
}

impl Source for Oscillator {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples - self.position)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_nanos(
            self.total_samples as u64 * 1_000_000_000 / SAMPLE_RATE as u64,
        ))
    }
}

/// Default output device via rodio.
#[derive(Default)]
pub struct RodioAudio {
    tones: Option<Sender<Tone>>,
}

impl RodioAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioCapability for RodioAudio {
    fn name(&self) -> &'static str {
        "rodio"
    }

    fn acquire(&mut self) -> Result<(), FeedbackError> {
        if self.tones.is_some() {
            return Ok(());
        }

        let (tone_tx, tone_rx) = channel::<Tone>();
        let (ready_tx, ready_rx) = channel::<Result<(), String>>();

        thread::Builder::new()
            .name("paraules-audio".into())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(output) => output,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));

                while let Ok(tone) = tone_rx.recv() {
                    if let Err(e) = handle.play_raw(Oscillator::new(&tone)) {
                        debug!(error = %e, "tone dropped");
                    }
                }
            })
            .map_err(|e| FeedbackError::Backend(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.tones = Some(tone_tx);
                Ok(())
            }
            Ok(Err(message)) => Err(FeedbackError::Backend(message)),
            Err(_) => Err(FeedbackError::CapabilityUnavailable("audio")),
        }
    }

    fn release(&mut self) {
        // Dropping the sender ends the audio thread, which drops the stream.
        self.tones = None;
    }

    fn play_tone(&mut self, tone: &Tone) -> Result<(), FeedbackError> {
        let tones = self
            .tones
            .as_ref()
            .ok_or(FeedbackError::CapabilityUnavailable("audio"))?;
        tones
            .send(*tone)
            .map_err(|_| FeedbackError::Backend("audio thread stopped".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(waveform: Waveform) -> Tone {
        Tone {
            frequency_hz: 441.0,
            duration_ms: 100,
            waveform,
            volume: 0.5,
        }
    }

    #[test]
    fn oscillator_length_matches_duration() {
        let osc = Oscillator::new(&tone(Waveform::Sine));
        assert_eq!(osc.total_duration(), Some(Duration::from_millis(100)));
        assert_eq!(osc.count(), 4410);
    }

    #[test]
    fn samples_stay_within_volume() {
        for waveform in [Waveform::Sine, Waveform::Square] {
            assert!(Oscillator::new(&tone(waveform)).all(|s| s.abs() <= 0.5 + f32::EPSILON));
        }
    }

    #[test]
    fn square_wave_is_two_level() {
        let mut osc = Oscillator::new(&tone(Waveform::Square));
        assert!(osc.all(|s| s == 0.5 || s == -0.5));
    }

    #[test]
    fn play_before_acquire_is_unavailable() {
        let mut audio = RodioAudio::new();
        assert!(matches!(
            audio.play_tone(&tone(Waveform::Sine)),
            Err(FeedbackError::CapabilityUnavailable("audio"))
        ));
    }
}
