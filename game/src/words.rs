//! Word selection: built-in pools, custom lists and the provider seam.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, CustomWords, Difficulty, GameConfig};
use crate::grid::WORD_COUNT;

/// One word to memorise. `index` is its fixed grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub index: usize,
}

impl Word {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
        }
    }
}

pub const EASY_POOL: [&str; 40] = [
    "cat", "dog", "sun", "moon", "tree", "car", "book", "house", "star", "fish", "bird",
    "flower", "apple", "ball", "chair", "door", "window", "heart", "smile", "cloud", "rain",
    "fire", "water", "hand", "foot", "eye", "nose", "ear", "mouth", "hair", "lamp", "desk",
    "phone", "cup", "bowl", "fork", "key", "lock", "shoe", "hat",
];

pub const MEDIUM_POOL: [&str; 40] = [
    "elephant", "computer", "bicycle", "mountain", "keyboard", "umbrella", "volcano", "penguin",
    "butterfly", "telescope", "lighthouse", "dinosaur", "rainbow", "waterfall", "compass",
    "helicopter", "pineapple", "octopus", "pyramid", "sandwich", "kangaroo", "dolphin", "guitar",
    "robot", "castle", "astronaut", "tornado", "submarine", "igloo", "microscope", "flamingo",
    "cactus", "parachute", "windmill", "rocket", "carousel", "treasure", "anchor", "hammock",
    "peacock",
];

pub const HARD_POOL: [&str; 39] = [
    "architecture", "metamorphosis", "constellation", "photosynthesis", "microscope",
    "satellite", "ecosystem", "renaissance", "democracy", "fibonacci", "algorithm", "combustion",
    "chromosome", "gravity", "electricity", "thermometer", "excavation", "judiciary",
    "laboratory", "magnetism", "metabolism", "equilibrium", "precipitation", "synthesis",
    "referendum", "infrastructure", "biodiversity", "phenomenon", "hieroglyphics", "parliament",
    "expedition", "archaeology", "bureaucracy", "catastrophe", "contradiction", "pharmaceutical",
    "revolutionary", "transparency", "hypothesis",
];

pub fn pool(difficulty: Difficulty) -> Option<&'static [&'static str]> {
    match difficulty {
        Difficulty::Easy => Some(&EASY_POOL),
        Difficulty::Medium => Some(&MEDIUM_POOL),
        Difficulty::Hard => Some(&HARD_POOL),
        Difficulty::Custom => None,
    }
}

/// Supplies the 20 words of a built-in difficulty.
pub trait WordProvider {
    fn select_words(&mut self, difficulty: Difficulty) -> Result<Vec<Word>, ConfigError>;
}

/// Shuffles a built-in pool and keeps the first `WORD_COUNT` entries.
#[derive(Debug, Clone)]
pub struct PoolWordProvider {
    rng: StdRng,
}

impl PoolWordProvider {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl WordProvider for PoolWordProvider {
    fn select_words(&mut self, difficulty: Difficulty) -> Result<Vec<Word>, ConfigError> {
        let pool = pool(difficulty).ok_or(ConfigError::NoBuiltinPool)?;
        let mut order: Vec<usize> = (0..pool.len()).collect();
        order.shuffle(&mut self.rng);
        Ok(order
            .into_iter()
            .take(WORD_COUNT)
            .enumerate()
            .map(|(index, source)| Word::new(pool[source], index))
            .collect())
    }
}

const DELIMITERS: [char; 2] = [',', '\u{FF0C}'];

/// Splits raw user input on ASCII and fullwidth commas, trimming and dropping empty tokens.
pub fn split_custom_words(raw: &str) -> Vec<String> {
    raw.split(&DELIMITERS[..])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_custom_words(raw: &str) -> Result<CustomWords, ConfigError> {
    CustomWords::new(split_custom_words(raw))
}

pub fn custom_to_words(words: &CustomWords) -> Vec<Word> {
    words
        .as_slice()
        .iter()
        .enumerate()
        .map(|(index, text)| Word::new(text.clone(), index))
        .collect()
}

/// Words for a session: the custom list if configured, otherwise the provider's pick.
pub fn words_for_config<P: WordProvider + ?Sized>(
    provider: &mut P,
    config: &GameConfig,
) -> Result<Vec<Word>, ConfigError> {
    match config.custom_words() {
        Some(custom) => Ok(custom_to_words(custom)),
        None => provider.select_words(config.difficulty()),
    }
}
