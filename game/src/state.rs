//! The session aggregate and its single transition function.

use std::fmt;

use engine::GameLogic;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::grid::WORD_COUNT;
use crate::scorer::{self, AnswerResult};
use crate::snapshot::Snapshot;
use crate::words::{Word, WordProvider, words_for_config};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Landing,
    Playing,
    Recall,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    phase: Phase,
    config: Option<GameConfig>,
    words: Vec<Word>,
    current_word_index: usize,
    drawings: [Option<Snapshot>; WORD_COUNT],
    canvas_image: Option<Snapshot>,
    user_answers: [String; WORD_COUNT],
    score: usize,
    results: Vec<AnswerResult>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Landing phase with every collection pre-sized and empty.
    pub fn new() -> Self {
        Self {
            phase: Phase::Landing,
            config: None,
            words: Vec::new(),
            current_word_index: 0,
            drawings: std::array::from_fn(|_| None),
            canvas_image: None,
            user_answers: std::array::from_fn(|_| String::new()),
            score: 0,
            results: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// `0..WORD_COUNT` while playing; `WORD_COUNT` once every word has been shown.
    pub fn current_word_index(&self) -> usize {
        self.current_word_index
    }

    pub fn current_word(&self) -> Option<&Word> {
        match self.phase {
            Phase::Playing => self.words.get(self.current_word_index),
            _ => None,
        }
    }

    pub fn is_last_word(&self) -> bool {
        self.phase == Phase::Playing && self.current_word_index + 1 == WORD_COUNT
    }

    pub fn drawings(&self) -> &[Option<Snapshot>; WORD_COUNT] {
        &self.drawings
    }

    pub fn canvas_image(&self) -> Option<&Snapshot> {
        self.canvas_image.as_ref()
    }

    pub fn user_answers(&self) -> &[String; WORD_COUNT] {
        &self.user_answers
    }

    /// Only meaningful once answers have been submitted.
    pub fn score(&self) -> Option<usize> {
        (self.phase == Phase::Results).then_some(self.score)
    }

    pub fn results(&self) -> &[AnswerResult] {
        &self.results
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `words` must already be resolved (see `Action::start_game`) so the reducer stays pure.
    StartGame {
        config: GameConfig,
        words: Vec<Word>,
    },
    NextWord,
    SaveDrawing {
        index: usize,
        image: Snapshot,
    },
    SaveCanvas(Snapshot),
    /// Skip straight to recall without showing the remaining words.
    StartRecall,
    UpdateAnswer {
        index: usize,
        text: String,
    },
    SubmitAnswers,
    RestartGame,
}

impl Action {
    pub fn start_game<P: WordProvider + ?Sized>(
        config: GameConfig,
        provider: &mut P,
    ) -> Result<Self, ConfigError> {
        let words = words_for_config(provider, &config)?;
        Ok(Action::StartGame { config, words })
    }

    fn name(&self) -> &'static str {
        match self {
            Action::StartGame { .. } => "START_GAME",
            Action::NextWord => "NEXT_WORD",
            Action::SaveDrawing { .. } => "SAVE_DRAWING",
            Action::SaveCanvas(_) => "SAVE_CANVAS",
            Action::StartRecall => "START_RECALL",
            Action::UpdateAnswer { .. } => "UPDATE_ANSWER",
            Action::SubmitAnswers => "SUBMIT_ANSWERS",
            Action::RestartGame => "RESTART_GAME",
        }
    }
}

/// A broken caller contract: panics in debug builds, is logged and ignored in release.
fn contract_violation(state: &SessionState, what: fmt::Arguments<'_>) -> SessionState {
    if cfg!(debug_assertions) {
        panic!("session contract violated: {what}");
    }
    log::error!("session contract violated, action ignored: {what}");
    state.clone()
}

/// Pure transition function. Actions that make no sense in the current phase leave the state
/// unchanged.
pub fn reduce(state: &SessionState, action: Action) -> SessionState {
    let name = action.name();
    let from = state.phase;

    let next = match (state.phase, action) {
        (Phase::Landing, Action::StartGame { config, words }) => {
            if words.len() != WORD_COUNT {
                return contract_violation(
                    state,
                    format_args!("START_GAME with {} words", words.len()),
                );
            }
            SessionState {
                phase: Phase::Playing,
                config: Some(config),
                words,
                ..SessionState::new()
            }
        }

        (Phase::Playing, Action::NextWord) => {
            let next_index = state.current_word_index + 1;
            if next_index >= WORD_COUNT {
                SessionState {
                    phase: Phase::Recall,
                    current_word_index: WORD_COUNT,
                    ..state.clone()
                }
            } else {
                SessionState {
                    current_word_index: next_index,
                    ..state.clone()
                }
            }
        }

        (Phase::Landing, Action::SaveDrawing { .. }) => state.clone(),
        (_, Action::SaveDrawing { index, image }) => {
            if index >= WORD_COUNT {
                return contract_violation(state, format_args!("SAVE_DRAWING index {index}"));
            }
            let mut next = state.clone();
            next.drawings[index] = Some(image);
            next
        }

        (Phase::Playing | Phase::Recall, Action::SaveCanvas(image)) => SessionState {
            canvas_image: Some(image),
            ..state.clone()
        },

        (Phase::Playing, Action::StartRecall) => SessionState {
            phase: Phase::Recall,
            ..state.clone()
        },

        (Phase::Recall, Action::UpdateAnswer { index, text }) => {
            if index >= WORD_COUNT {
                return contract_violation(state, format_args!("UPDATE_ANSWER index {index}"));
            }
            let mut next = state.clone();
            next.user_answers[index] = text;
            next
        }

        (Phase::Recall, Action::SubmitAnswers) => {
            let outcome = scorer::score(&state.words, &state.user_answers);
            SessionState {
                phase: Phase::Results,
                score: outcome.score,
                results: outcome.results,
                ..state.clone()
            }
        }

        (_, Action::RestartGame) => SessionState::new(),

        (phase, _) => {
            log::trace!("{name} ignored in {phase:?}");
            return state.clone();
        }
    };

    if next.phase != from {
        log::debug!("{name}: {from:?} -> {:?}", next.phase);
    }
    next
}

/// Adapts `reduce` to the engine's `GameLogic` so a `Store` can own the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionLogic;

impl GameLogic for SessionLogic {
    type State = SessionState;
    type Input = Action;

    fn initial_state(&self) -> Self::State {
        SessionState::new()
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        reduce(state, input)
    }
}
