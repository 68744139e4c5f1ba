pub mod audio;
pub mod config;
pub mod engine;
pub mod feedback;
pub mod speech;
pub mod terminal;

use std::path::Path;

use anyhow::Context;
use paraules_core::{vocabulary, AudioCapability, Effect, Game, SpeechCapability, Vocabulary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::audio::RodioAudio;
use crate::config::Settings;
use crate::engine::{spawn_voice_watcher, Engine, VOICE_POLL_INTERVAL};
use crate::feedback::FeedbackEmitter;

/// Read a vocabulary file.
pub fn load_vocabulary(path: &Path) -> anyhow::Result<Vocabulary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading vocabulary {}", path.display()))?;
    vocabulary::parse(&content).with_context(|| format!("parsing vocabulary {}", path.display()))
}

/// Bring up the platform audio and speech capabilities unless muted.
pub fn system_feedback(settings: &Settings) -> FeedbackEmitter {
    let preferences = settings.game.voice_preferences.clone();
    if settings.muted {
        info!("muted, feedback disabled");
        return FeedbackEmitter::silent(preferences);
    }
    let audio: Box<dyn AudioCapability> = Box::new(RodioAudio::new());
    let speech: Box<dyn SpeechCapability> = speech::system_speech();
    FeedbackEmitter::acquire(Some(audio), Some(speech), preferences)
}

pub async fn run() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&settings.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let vocabulary = match &settings.vocabulary_path {
        Some(path) => load_vocabulary(path).unwrap_or_else(|e| {
            warn!(error = %format!("{e:#}"), "falling back to built-in vocabulary");
            Vocabulary::builtin()
        }),
        None => Vocabulary::builtin(),
    };
    info!(words = vocabulary.len(), "vocabulary loaded");

    let mut rng = StdRng::from_entropy();
    let (game, effects) = Game::new(vocabulary, &settings.game, &mut rng);
    for effect in effects {
        if let Effect::Warn { warning } = effect {
            warn!(%warning, "round size");
        }
    }

    let feedback = {
        let settings = settings.clone();
        tokio::task::spawn_blocking(move || system_feedback(&settings)).await?
    };

    let (engine, handle) = Engine::new(game, rng, feedback);
    let engine_task = engine.spawn();
    let watcher_task = spawn_voice_watcher(handle.clone(), VOICE_POLL_INTERVAL);

    let result = terminal::drive(
        &handle,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await;

    watcher_task.abort();
    let _ = handle.shutdown();
    engine_task.await?;
    result
}
