//! A scripted player for headless runs: scribbles into each cell and recalls all but the last
//! few words.

use std::time::Duration;

use engine::geometry::{Point, Rect};

use crate::config::CaptureGranularity;
use crate::drawing::DrawingSurface;
use crate::grid::{self, COLUMNS, ROWS, WORD_COUNT};
use crate::session::GameSession;
use crate::speech::Speech;
use crate::state::Phase;
use crate::words::WordProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Jumps a whole second per step.
    Simulated,
    /// Real `tokio::time` ticks.
    Realtime,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedPlayer {
    forget: usize,
}

impl ScriptedPlayer {
    /// `forget` answers are left blank, counted back from the last word.
    pub fn new(forget: usize) -> Self {
        Self {
            forget: forget.min(WORD_COUNT),
        }
    }

    /// Draws a zigzag inside the region that belongs to `index`.
    pub fn scribble(
        &self,
        surface: &mut DrawingSurface,
        index: usize,
        granularity: CaptureGranularity,
    ) {
        let size = surface.size();
        let region = match granularity {
            CaptureGranularity::PerCell => Rect::from_size(size.width, size.height),
            CaptureGranularity::WholeCanvas => {
                grid::cell_rect(index, size.width / COLUMNS, size.height / ROWS)
            }
        };
        let inset = region.w.min(region.h) as f32 * 0.2;
        let left = region.x as f32 + inset;
        let top = region.y as f32 + inset;
        let right = (region.x + region.w) as f32 - inset;
        let bottom = (region.y + region.h) as f32 - inset;

        let teeth = 2 + index % 4;
        let step = (right - left) / teeth as f32;
        surface.begin(Point::new(left, bottom));
        for tooth in 1..=teeth {
            let y = if tooth % 2 == 1 { top } else { bottom };
            surface.extend(Point::new(left + step * tooth as f32, y));
        }
        surface.end();
    }

    /// Answer typed for cell `index`, given the word that was shown there.
    pub fn recall(&self, index: usize, word: &str) -> String {
        if index + self.forget >= WORD_COUNT {
            String::new()
        } else {
            word.to_string()
        }
    }

    /// Plays the current session from its first word through to `Recall` and fills in the
    /// answers. The caller decides when to submit.
    pub async fn play<P: WordProvider, S: Speech>(
        &self,
        session: &mut GameSession<P, S>,
        clock: Clock,
    ) {
        let granularity = session.granularity();
        let mut scribbled = None;
        let mut interval = tokio::time::interval(Duration::from_millis(100));
        let mut last = tokio::time::Instant::now();

        while session.state().phase() == Phase::Playing {
            let index = session.state().current_word_index();
            if scribbled != Some(index) {
                if let Some(surface) = session.surface_mut() {
                    self.scribble(surface, index, granularity);
                }
                scribbled = Some(index);
            }
            match clock {
                Clock::Simulated => session.tick(Duration::from_secs(1)).await,
                Clock::Realtime => {
                    interval.tick().await;
                    let now = tokio::time::Instant::now();
                    session.tick(now - last).await;
                    last = now;
                }
            }
        }

        let answers: Vec<String> = session
            .state()
            .words()
            .iter()
            .map(|word| self.recall(word.index, &word.text))
            .collect();
        for (index, answer) in answers.into_iter().enumerate() {
            session.update_answer(index, answer);
        }
    }
}
