use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::grid::WORD_COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Custom word list did not contain exactly `WORD_COUNT` entries.
    CustomWordCount { found: usize },
    EmptyCustomWord { index: usize },
    MissingCustomWords,
    UnexpectedCustomWords,
    /// A built-in pool was requested for `Difficulty::Custom`.
    NoBuiltinPool,
    UnknownValue { field: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CustomWordCount { found } => {
                write!(f, "expected exactly {WORD_COUNT} custom words, found {found}")
            }
            ConfigError::EmptyCustomWord { index } => write!(f, "custom word #{index} is empty"),
            ConfigError::MissingCustomWords => {
                write!(f, "custom difficulty requires a custom word list")
            }
            ConfigError::UnexpectedCustomWords => {
                write!(f, "custom words are only accepted with the custom difficulty")
            }
            ConfigError::NoBuiltinPool => write!(f, "custom difficulty has no built-in word pool"),
            ConfigError::UnknownValue { field, value } => {
                write!(f, "unknown {field} '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Custom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    #[default]
    Digital,
    Physical,
}

/// Seconds each word stays on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeDifficulty {
    Dumb,
    #[default]
    Normal,
    Hell,
}

impl TimeDifficulty {
    pub const fn seconds(self) -> u32 {
        match self {
            TimeDifficulty::Dumb => 5,
            TimeDifficulty::Normal => 3,
            TimeDifficulty::Hell => 1,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::from_secs(self.seconds() as u64)
    }
}

/// Whether drawings are snapshotted per cell after every word (small screens) or once for the
/// whole 5x4 canvas after the last word (large screens).
///
/// Chosen by the presentation layer; the session state machine only stores the results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureGranularity {
    PerCell,
    #[default]
    WholeCanvas,
}

macro_rules! parse_lowercase {
    ($ty:ty, $field:literal, { $($name:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(ConfigError::UnknownValue {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

parse_lowercase!(Difficulty, "difficulty", {
    "easy" => Difficulty::Easy,
    "medium" => Difficulty::Medium,
    "hard" => Difficulty::Hard,
    "custom" => Difficulty::Custom,
});

parse_lowercase!(DrawingMode, "drawing mode", {
    "digital" => DrawingMode::Digital,
    "physical" => DrawingMode::Physical,
});

parse_lowercase!(TimeDifficulty, "time difficulty", {
    "dumb" => TimeDifficulty::Dumb,
    "normal" => TimeDifficulty::Normal,
    "hell" => TimeDifficulty::Hell,
});

parse_lowercase!(CaptureGranularity, "capture granularity", {
    "per-cell" => CaptureGranularity::PerCell,
    "cell" => CaptureGranularity::PerCell,
    "whole-canvas" => CaptureGranularity::WholeCanvas,
    "canvas" => CaptureGranularity::WholeCanvas,
});

/// Exactly `WORD_COUNT` trimmed, non-empty words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CustomWords(Vec<String>);

impl CustomWords {
    pub fn new(words: Vec<String>) -> Result<Self, ConfigError> {
        if words.len() != WORD_COUNT {
            return Err(ConfigError::CustomWordCount { found: words.len() });
        }
        let mut trimmed = Vec::with_capacity(WORD_COUNT);
        for (index, word) in words.into_iter().enumerate() {
            let word = word.trim();
            if word.is_empty() {
                return Err(ConfigError::EmptyCustomWord { index });
            }
            trimmed.push(word.to_string());
        }
        Ok(Self(trimmed))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for CustomWords {
    type Error = ConfigError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<CustomWords> for Vec<String> {
    fn from(words: CustomWords) -> Self {
        words.0
    }
}

/// Chosen on the landing screen; immutable for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    difficulty: Difficulty,
    drawing_mode: DrawingMode,
    time_difficulty: TimeDifficulty,
    custom_words: Option<CustomWords>,
}

impl GameConfig {
    pub fn new(
        difficulty: Difficulty,
        drawing_mode: DrawingMode,
        time_difficulty: TimeDifficulty,
        custom_words: Option<CustomWords>,
    ) -> Result<Self, ConfigError> {
        match (difficulty, &custom_words) {
            (Difficulty::Custom, None) => return Err(ConfigError::MissingCustomWords),
            (Difficulty::Easy | Difficulty::Medium | Difficulty::Hard, Some(_)) => {
                return Err(ConfigError::UnexpectedCustomWords);
            }
            _ => {}
        }
        Ok(Self {
            difficulty,
            drawing_mode,
            time_difficulty,
            custom_words,
        })
    }

    /// Built-in difficulty without custom words.
    pub fn builtin(
        difficulty: Difficulty,
        drawing_mode: DrawingMode,
        time_difficulty: TimeDifficulty,
    ) -> Result<Self, ConfigError> {
        Self::new(difficulty, drawing_mode, time_difficulty, None)
    }

    pub fn custom(
        words: CustomWords,
        drawing_mode: DrawingMode,
        time_difficulty: TimeDifficulty,
    ) -> Self {
        Self {
            difficulty: Difficulty::Custom,
            drawing_mode,
            time_difficulty,
            custom_words: Some(words),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn drawing_mode(&self) -> DrawingMode {
        self.drawing_mode
    }

    pub fn time_difficulty(&self) -> TimeDifficulty {
        self.time_difficulty
    }

    pub fn custom_words(&self) -> Option<&CustomWords> {
        self.custom_words.as_ref()
    }

    pub fn is_digital(&self) -> bool {
        self.drawing_mode == DrawingMode::Digital
    }

    pub fn seconds_per_word(&self) -> u32 {
        self.time_difficulty.seconds()
    }
}
