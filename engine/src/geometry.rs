//! Minimal 2D geometry: integer pixel rectangles and floating-point points.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && px < self.x.saturating_add(self.w)
            && py >= self.y
            && py < self.y.saturating_add(self.h)
    }

    /// Clips this rect to `[0, width) x [0, height)`. Returns `None` when nothing is left.
    pub fn clipped(&self, width: u32, height: u32) -> Option<Self> {
        let max_x = self.x.saturating_add(self.w).min(width);
        let max_y = self.y.saturating_add(self.h).min(height);
        if self.x >= max_x || self.y >= max_y {
            return None;
        }
        Some(Self::new(self.x, self.y, max_x - self.x, max_y - self.y))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance from `self` to the closed segment `a..b`.
    pub fn distance_to_segment(self, a: Point, b: Point) -> f32 {
        let abx = b.x - a.x;
        let aby = b.y - a.y;
        let len_sq = abx * abx + aby * aby;
        let t = if len_sq <= f32::EPSILON {
            0.0
        } else {
            (((self.x - a.x) * abx + (self.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
        };
        let cx = a.x + abx * t;
        let cy = a.y + aby * t;
        ((self.x - cx).powi(2) + (self.y - cy).powi(2)).sqrt()
    }
}
