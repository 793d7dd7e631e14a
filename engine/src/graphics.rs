use crate::codec::RgbaImage;
use crate::geometry::{Point, Rect};
use crate::surface::SurfaceSize;

pub type Color = [u8; 4];

pub const WHITE: Color = [255, 255, 255, 255];
pub const BLACK: Color = [0, 0, 0, 255];

/// Unified 2D rendering interface.
///
/// Callers describe shapes; the implementation decides how they land in pixels.
pub trait Renderer2d {
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// A line segment of `width` pixels with round caps.
    ///
    /// Every pixel whose centre lies within `width / 2` of the segment is painted, so
    /// consecutive segments sharing an endpoint join without gaps.
    fn stroke_segment(&mut self, from: Point, to: Point, width: f32, color: Color);

    /// Draws `image` scaled (nearest neighbour) to exactly fill `dest`.
    fn draw_image(&mut self, image: &RgbaImage, dest: Rect);

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn frame_is_valid(&self) -> bool {
        let expected = self.size.rgba_len();
        expected != 0 && self.frame.len() >= expected
    }

    fn put(&mut self, x: u32, y: u32, color: Color) {
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = &mut self.frame[i..i + 4];
        match color[3] {
            255 => px.copy_from_slice(&color),
            0 => {}
            a => {
                let a = a as u32;
                let inv = 255 - a;
                for c in 0..3 {
                    px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                }
                px[3] = 255;
            }
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !self.frame_is_valid() {
            return;
        }
        let Some(r) = rect.clipped(self.size.width, self.size.height) else {
            return;
        };

        let stride = self.size.width as usize * 4;
        let row_bytes = r.w as usize * 4;
        let mut row_start = r.y as usize * stride + r.x as usize * 4;
        for _ in 0..r.h {
            let row = &mut self.frame[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
            row_start += stride;
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, width: f32, color: Color) {
        if !self.frame_is_valid() || width <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let max_x = self.size.width as i64;
        let max_y = self.size.height as i64;

        let x0 = ((from.x.min(to.x) - half).floor() as i64).clamp(0, max_x);
        let x1 = ((from.x.max(to.x) + half).ceil() as i64 + 1).clamp(0, max_x);
        let y0 = ((from.y.min(to.y) - half).floor() as i64).clamp(0, max_y);
        let y1 = ((from.y.max(to.y) + half).ceil() as i64 + 1).clamp(0, max_y);

        for y in y0..y1 {
            for x in x0..x1 {
                let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if centre.distance_to_segment(from, to) <= half {
                    self.put(x as u32, y as u32, color);
                }
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect) {
        if !self.frame_is_valid() || dest.w == 0 || dest.h == 0 || image.size().is_empty() {
            return;
        }
        let Some(clip) = dest.clipped(self.size.width, self.size.height) else {
            return;
        };
        let src = image.size();

        for y in clip.y..clip.y + clip.h {
            let sy = ((y - dest.y) as u64 * src.height as u64 / dest.h as u64) as u32;
            for x in clip.x..clip.x + clip.w {
                let sx = ((x - dest.x) as u64 * src.width as u64 / dest.w as u64) as u32;
                if let Some(color) = image.pixel(sx, sy) {
                    self.put(x, y, color);
                }
            }
        }
    }
}
