//! Event loop that owns the game.
//!
//! All input, whether from the player, an expired timer, or the voice watcher,
//! goes through one unbounded queue. The loop handles each message with a
//! single synchronous `Game::dispatch`, so a resolution and the clearing of
//! the selection always finish before the next message is looked at.

use crate::feedback::FeedbackEmitter;
use paraules_core::types::{Column, LetterCase};
use paraules_core::{Effect, Event, Game, GameView};
use rand::rngs::StdRng;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How often the voice watcher asks the speech backend for its voices.
pub const VOICE_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine stopped")]
    Stopped,
}

/// Messages accepted by the engine loop.
#[derive(Debug)]
pub enum Message {
    Game(Event),
    RefreshVoices,
    Snapshot(oneshot::Sender<GameView>),
    Shutdown,
}

/// Cloneable sender side of the engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl EngineHandle {
    fn send(&self, message: Message) -> Result<(), EngineError> {
        self.tx.send(message).map_err(|_| EngineError::Stopped)
    }

    pub fn dispatch(&self, event: Event) -> Result<(), EngineError> {
        self.send(Message::Game(event))
    }

    pub fn select_card(&self, column: Column, key: impl Into<String>) -> Result<(), EngineError> {
        self.dispatch(Event::SelectCard {
            column,
            key: key.into(),
        })
    }

    pub fn start_new_round(&self) -> Result<(), EngineError> {
        self.dispatch(Event::StartNewRound)
    }

    pub fn set_round_size(&self, size: usize) -> Result<(), EngineError> {
        self.dispatch(Event::SetRoundSize { size })
    }

    pub fn set_case(&self, uppercase: bool) -> Result<(), EngineError> {
        self.dispatch(Event::SetCase {
            case: LetterCase::from_uppercase(uppercase),
        })
    }

    pub fn refresh_voices(&self) -> Result<(), EngineError> {
        self.send(Message::RefreshVoices)
    }

    /// Current view, taken after every message sent before this call.
    pub async fn snapshot(&self) -> Result<GameView, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(Message::Snapshot(tx))?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    pub fn shutdown(&self) -> Result<(), EngineError> {
        self.send(Message::Shutdown)
    }
}

/// Owner of the game state and the feedback capabilities.
pub struct Engine {
    game: Game,
    rng: StdRng,
    feedback: FeedbackEmitter,
    rx: mpsc::UnboundedReceiver<Message>,
    timers: mpsc::WeakUnboundedSender<Message>,
}

impl Engine {
    pub fn new(game: Game, rng: StdRng, feedback: FeedbackEmitter) -> (Self, EngineHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Self {
            game,
            rng,
            feedback,
            rx,
            timers: tx.downgrade(),
        };
        (engine, EngineHandle { tx })
    }

    /// Spawn the loop on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Process messages until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        log_round(&self.game);
        while let Some(message) = self.rx.recv().await {
            match message {
                Message::Game(event) => self.handle_event(event),
                Message::RefreshVoices => self.feedback.refresh_voices(),
                Message::Snapshot(reply) => {
                    let _ = reply.send(self.game.view());
                }
                Message::Shutdown => break,
            }
        }
        self.feedback.release();
        info!("engine stopped");
    }

    fn handle_event(&mut self, event: Event) {
        let starts_round = matches!(event, Event::StartNewRound | Event::SetRoundSize { .. });
        debug!(?event, "event");

        let effects = self.game.dispatch(event, &mut self.rng);
        if starts_round {
            log_round(&self.game);
        }
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::PlayCue { cue } => {
                let (done, total) = self.game.round().progress();
                debug!(?cue, done, total, "resolved");
                self.feedback.play_cue(cue);
            }
            Effect::Speak { text } => self.feedback.speak(&text),
            Effect::ScheduleCelebrationClear { round, after } => {
                info!(round = %round, "round complete");
                let timers = self.timers.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    if let Some(tx) = timers.upgrade() {
                        let _ = tx.send(Message::Game(Event::CelebrationExpired { round }));
                    }
                });
            }
            Effect::Warn { warning } => warn!(%warning, "round size"),
        }
    }
}

fn log_round(game: &Game) {
    let round = game.round();
    info!(round = %round.id(), size = round.keys().len(), words = ?round.keys(), "round started");
}

/// Poll the speech backend's voice list on a fixed period.
///
/// Stops once the engine is gone.
pub fn spawn_voice_watcher(handle: EngineHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if handle.refresh_voices().is_err() {
                break;
            }
        }
    })
}
