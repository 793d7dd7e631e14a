//! Drives one game: owns the store, the countdown, the mounted drawing surface and speech.
//!
//! Every word follows the same order when its countdown completes: capture the drawing,
//! composite on the final word, then advance. The reducer never sees a timer directly; the
//! countdown's completion is sent through a channel tagged with its `TimerToken` and anything
//! but the latest token is dropped.

use std::fmt;
use std::time::Duration;

use engine::Store;
use tokio::sync::mpsc;

use crate::compositor;
use crate::config::{CaptureGranularity, ConfigError, GameConfig};
use crate::drawing::DrawingSurface;
use crate::scorer::ScoreSummary;
use crate::snapshot::Snapshot;
use crate::speech::{Speech, SpeechError, SpeechSettings};
use crate::state::{Action, Phase, SessionLogic, SessionState};
use crate::timer::{CountdownTimer, TimerToken};
use crate::words::WordProvider;

#[derive(Debug)]
pub enum SessionError {
    Config(ConfigError),
    WrongPhase { expected: Phase, found: Phase },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Config(e) => write!(f, "invalid game config: {e}"),
            SessionError::WrongPhase { expected, found } => {
                write!(f, "expected phase {expected:?}, session is in {found:?}")
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Config(e) => Some(e),
            SessionError::WrongPhase { .. } => None,
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        SessionError::Config(e)
    }
}

pub struct GameSession<P, S> {
    store: Store<SessionLogic>,
    provider: P,
    speech: S,
    speech_settings: SpeechSettings,
    granularity: CaptureGranularity,
    surface: Option<DrawingSurface>,
    timer: CountdownTimer,
    awaiting: Option<TimerToken>,
    completed_tx: mpsc::UnboundedSender<TimerToken>,
    completed_rx: mpsc::UnboundedReceiver<TimerToken>,
}

impl<P, S> fmt::Debug for GameSession<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.store.state().phase())
            .field("word", &self.store.state().current_word_index())
            .field("granularity", &self.granularity)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl<P: WordProvider, S: Speech> GameSession<P, S> {
    pub fn new(provider: P, speech: S) -> Self {
        let (completed_tx, completed_rx) = mpsc::unbounded_channel();
        Self {
            store: Store::new(SessionLogic),
            provider,
            speech,
            speech_settings: SpeechSettings::default(),
            granularity: CaptureGranularity::default(),
            surface: None,
            timer: CountdownTimer::new(),
            awaiting: None,
            completed_tx,
            completed_rx,
        }
    }

    pub fn with_granularity(mut self, granularity: CaptureGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_speech_settings(mut self, settings: SpeechSettings) -> Self {
        self.speech_settings = settings;
        self
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    pub fn granularity(&self) -> CaptureGranularity {
        self.granularity
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    /// The raster the player draws on. `None` outside a digital playing phase.
    pub fn surface(&self) -> Option<&DrawingSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut DrawingSurface> {
        self.surface.as_mut()
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.timer.is_running().then(|| self.timer.remaining_secs())
    }

    /// Resolves the words, enters `Playing` and starts the first countdown.
    pub fn start_game(&mut self, config: GameConfig) -> Result<(), SessionError> {
        self.expect_phase(Phase::Landing)?;
        let action = Action::start_game(config, &mut self.provider)?;
        self.store.dispatch(action);

        let digital = self.state().config().is_some_and(GameConfig::is_digital);
        self.surface = digital.then(|| match self.granularity {
            CaptureGranularity::PerCell => DrawingSurface::single_cell(),
            CaptureGranularity::WholeCanvas => DrawingSurface::full_grid(),
        });
        log::info!(
            "game started: {} words, {:?} capture, digital={digital}",
            self.state().words().len(),
            self.granularity
        );

        self.begin_word();
        Ok(())
    }

    /// Feeds wall-clock time and handles any countdown that completed.
    pub async fn tick(&mut self, elapsed: Duration) {
        self.timer.advance(elapsed);
        while let Ok(token) = self.completed_rx.try_recv() {
            if self.awaiting != Some(token) {
                log::trace!("dropping stale completion {token:?}");
                continue;
            }
            self.awaiting = None;
            self.finish_word().await;
        }
    }

    /// Skips the remaining words and goes straight to recall.
    pub fn start_recall(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Phase::Playing)?;
        self.store.dispatch(Action::StartRecall);
        self.leave_playing();
        Ok(())
    }

    pub fn update_answer(&mut self, index: usize, text: impl Into<String>) {
        self.store.dispatch(Action::UpdateAnswer {
            index,
            text: text.into(),
        });
    }

    pub fn submit_answers(&mut self) -> Result<ScoreSummary, SessionError> {
        self.expect_phase(Phase::Recall)?;
        self.store.dispatch(Action::SubmitAnswers);
        let score = self.state().score().unwrap_or_default();
        let summary = ScoreSummary::new(score);
        log::info!(
            "answers submitted: {}/{} ({}%)",
            summary.score,
            summary.total,
            summary.percentage
        );
        Ok(summary)
    }

    /// Back to landing from anywhere. Any running countdown is abandoned.
    pub fn restart(&mut self) {
        self.leave_playing();
        while self.completed_rx.try_recv().is_ok() {}
        self.store.dispatch(Action::RestartGame);
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), SessionError> {
        let found = self.state().phase();
        if found == expected {
            Ok(())
        } else {
            Err(SessionError::WrongPhase { expected, found })
        }
    }

    fn begin_word(&mut self) {
        let Some(word) = self.state().current_word().cloned() else {
            return;
        };
        let seconds = self
            .state()
            .config()
            .map(GameConfig::seconds_per_word)
            .unwrap_or_default();
        log::debug!("word {} for {seconds}s", word.index);

        if self.speech_settings.enabled && self.speech.is_supported() {
            match self.speech.speak(&word.text, &self.speech_settings) {
                Ok(()) => {}
                Err(SpeechError::Unsupported) => log::debug!("speech unavailable, word not read"),
                Err(e) => log::warn!("could not read word {}: {e}", word.index),
            }
        }

        let tx = self.completed_tx.clone();
        let token = self.timer.start(seconds, move |token| {
            // The receiver lives as long as the session; a send error only happens on drop.
            let _ = tx.send(token);
        });
        self.awaiting = Some(token);
    }

    async fn finish_word(&mut self) {
        if self.state().phase() != Phase::Playing {
            return;
        }
        let index = self.state().current_word_index();
        let last = self.state().is_last_word();

        if let Some(surface) = self.surface.as_mut() {
            surface.end();
            match self.granularity {
                CaptureGranularity::PerCell => {
                    if let Some(image) = capture(surface, index) {
                        self.store.dispatch(Action::SaveDrawing { index, image });
                    }
                    if last {
                        let drawings = self.store.state().drawings().clone();
                        match compositor::composite(&drawings).await {
                            Ok(canvas) => {
                                self.store.dispatch(Action::SaveCanvas(canvas));
                            }
                            Err(e) => log::error!("composite failed, continuing without it: {e}"),
                        }
                    }
                }
                CaptureGranularity::WholeCanvas => {
                    if last {
                        if let Some(canvas) = capture(surface, index) {
                            self.store.dispatch(Action::SaveCanvas(canvas));
                        }
                    }
                }
            }
        }

        self.store.dispatch(Action::NextWord);

        if self.state().phase() == Phase::Playing {
            if self.granularity == CaptureGranularity::PerCell {
                if let Some(surface) = self.surface.as_mut() {
                    surface.clear();
                }
            }
            self.begin_word();
        } else {
            self.leave_playing();
        }
    }

    fn leave_playing(&mut self) {
        self.timer.stop();
        self.awaiting = None;
        self.surface = None;
        self.speech.cancel();
    }
}

fn capture(surface: &DrawingSurface, index: usize) -> Option<Snapshot> {
    match surface.snapshot() {
        Ok(image) => Some(image),
        Err(e) => {
            log::error!("could not capture drawing for word {index}: {e}");
            None
        }
    }
}
