//! Freehand drawing capture onto a raster surface.
//!
//! Pointer input is modelled as a small state machine (`Idle` / `Stroking`) driven by three
//! events: `begin`, `extend`, `end`. Positions arrive in display coordinates and are mapped
//! into the surface's intrinsic pixels, so on-screen scaling never changes what is drawn.

use engine::codec::{CodecError, RgbaImage, encode_png};
use engine::geometry::Point;
use engine::graphics::{BLACK, Color, CpuRenderer, Renderer2d, WHITE};
use engine::surface::{RgbaBufferSurface, SurfaceSize};

use crate::grid;
use crate::snapshot::Snapshot;

pub const SINGLE_CELL_SIZE: SurfaceSize = SurfaceSize::new(300, 300);
pub const FULL_GRID_SIZE: SurfaceSize = SurfaceSize::new(600, 480);

const GUIDE_LINE_WIDTH: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: BLACK,
            width: 3.0,
        }
    }
}

/// Where the surface is rendered on screen, in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Maps a layout position to intrinsic pixels. `None` if the rect has no area.
    pub fn to_surface(&self, position: Point, size: SurfaceSize) -> Option<Point> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let scale_x = size.width as f32 / self.width;
        let scale_y = size.height as f32 / self.height;
        Some(Point::new(
            (position.x - self.left) * scale_x,
            (position.y - self.top) * scale_y,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    Idle,
    Stroking { last: Point },
}

/// A segment emitted by `extend`, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone)]
pub struct DrawingSurface {
    surface: RgbaBufferSurface,
    display: DisplayRect,
    guides: bool,
    style: StrokeStyle,
    stroke: StrokeState,
}

impl DrawingSurface {
    /// Blank white surface; with `guides` the 5x4 dividers are painted on top.
    pub fn new(size: SurfaceSize, guides: bool) -> Self {
        let mut surface = Self {
            surface: RgbaBufferSurface::filled(size, WHITE),
            display: DisplayRect::new(0.0, 0.0, size.width as f32, size.height as f32),
            guides,
            style: StrokeStyle::default(),
            stroke: StrokeState::Idle,
        };
        surface.clear();
        surface
    }

    /// One 300x300 cell, used when each word is captured separately.
    pub fn single_cell() -> Self {
        Self::new(SINGLE_CELL_SIZE, false)
    }

    /// The whole 600x480 board with guide lines.
    pub fn full_grid() -> Self {
        Self::new(FULL_GRID_SIZE, true)
    }

    pub fn size(&self) -> SurfaceSize {
        self.surface.size()
    }

    pub fn has_guides(&self) -> bool {
        self.guides
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.stroke
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.stroke, StrokeState::Stroking { .. })
    }

    pub fn surface(&self) -> &RgbaBufferSurface {
        &self.surface
    }

    /// Updates where the surface sits on screen (layout may change between events).
    pub fn set_display_rect(&mut self, display: DisplayRect) {
        self.display = display;
    }

    /// Starts a stroke at `position`. Ignored while a stroke is already active, so duplicate
    /// start events from one gesture (mouse and touch) don't move the anchor.
    pub fn begin(&mut self, position: Point) {
        if self.is_stroking() {
            return;
        }
        let Some(point) = self.display.to_surface(position, self.size()) else {
            return;
        };
        self.stroke = StrokeState::Stroking { last: point };
    }

    /// Draws from the last recorded point to `position` and returns the emitted segment.
    pub fn extend(&mut self, position: Point) -> Option<LineSegment> {
        let StrokeState::Stroking { last } = self.stroke else {
            return None;
        };
        let point = self.display.to_surface(position, self.size())?;

        let size = self.size();
        let mut gfx = CpuRenderer::new(self.surface.frame_mut(), size);
        gfx.stroke_segment(last, point, self.style.width, self.style.color);

        self.stroke = StrokeState::Stroking { last: point };
        Some(LineSegment {
            from: last,
            to: point,
        })
    }

    pub fn end(&mut self) {
        self.stroke = StrokeState::Idle;
    }

    /// Wipes everything to white and repaints guide lines when configured.
    pub fn clear(&mut self) {
        let size = self.size();
        let mut gfx = CpuRenderer::new(self.surface.frame_mut(), size);
        gfx.clear(WHITE);
        if self.guides {
            grid::draw_guide_lines(&mut gfx, GUIDE_LINE_WIDTH);
        }
    }

    pub fn image(&self) -> RgbaImage {
        RgbaImage::from_surface(&self.surface)
    }

    /// PNG snapshot of the current raster. Does not modify the surface.
    pub fn snapshot(&self) -> Result<Snapshot, CodecError> {
        let png = encode_png(self.size(), self.surface.frame())?;
        Ok(Snapshot::from_png(png))
    }
}
