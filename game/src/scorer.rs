use serde::{Deserialize, Serialize};

use crate::grid::WORD_COUNT;
use crate::words::Word;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub index: usize,
    pub input: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub score: usize,
    pub results: Vec<AnswerResult>,
}

/// Compares each recalled answer with the word shown in the same cell.
///
/// Answers are trimmed; both sides are case-folded. Always yields one result per cell.
pub fn score(words: &[Word], answers: &[String]) -> ScoreOutcome {
    let results: Vec<AnswerResult> = (0..WORD_COUNT)
        .map(|index| {
            let input = answers.get(index).cloned().unwrap_or_default();
            let is_correct = words
                .get(index)
                .is_some_and(|word| input.trim().to_lowercase() == word.text.to_lowercase());
            AnswerResult {
                index,
                input,
                is_correct,
            }
        })
        .collect();
    let score = results.iter().filter(|r| r.is_correct).count();
    ScoreOutcome { score, results }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grade {
    Perfect,
    Excellent,
    Good,
    NotBad,
    KeepPracticing,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            100.. => Grade::Perfect,
            80.. => Grade::Excellent,
            60.. => Grade::Good,
            40.. => Grade::NotBad,
            _ => Grade::KeepPracticing,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Grade::Perfect => "Perfect!",
            Grade::Excellent => "Excellent!",
            Grade::Good => "Good job!",
            Grade::NotBad => "Not bad!",
            Grade::KeepPracticing => "Keep practicing!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: Grade,
}

impl ScoreSummary {
    pub fn new(score: usize) -> Self {
        let percentage = ((score as f64 / WORD_COUNT as f64) * 100.0).round() as u32;
        Self {
            score,
            total: WORD_COUNT,
            percentage,
            grade: Grade::from_percentage(percentage),
        }
    }
}
