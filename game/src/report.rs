use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::scorer::ScoreSummary;
use crate::state::{Phase, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportItem {
    pub index: usize,
    pub word: String,
    pub answer: String,
    pub is_correct: bool,
}

/// Read-only summary of a finished session, as handed to exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub config: GameConfig,
    pub summary: ScoreSummary,
    pub items: Vec<ReportItem>,
    pub drawings_captured: usize,
    pub has_canvas_image: bool,
}

impl SessionReport {
    /// `None` until the session has reached `Results`.
    pub fn from_state(state: &SessionState) -> Option<Self> {
        if state.phase() != Phase::Results {
            return None;
        }
        let config = state.config()?.clone();
        let score = state.score()?;

        let items = state
            .results()
            .iter()
            .map(|result| ReportItem {
                index: result.index,
                word: state
                    .words()
                    .get(result.index)
                    .map(|w| w.text.clone())
                    .unwrap_or_default(),
                answer: result.input.clone(),
                is_correct: result.is_correct,
            })
            .collect();

        Some(Self {
            config,
            summary: ScoreSummary::new(score),
            items,
            drawings_captured: state.drawings().iter().filter(|d| d.is_some()).count(),
            has_canvas_image: state.canvas_image().is_some(),
        })
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
