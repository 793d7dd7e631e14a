use serde::{Deserialize, Serialize};

use crate::graphics::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// A fixed-size in-memory RGBA surface.
///
/// Rendering goes through `graphics::CpuRenderer` borrowed from `frame_mut()`; readers use
/// `frame()` or `pixel()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBufferSurface {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl RgbaBufferSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn filled(size: SurfaceSize, color: Color) -> Self {
        let mut surface = Self::new(size);
        for px in surface.buf.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
        surface
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn into_frame(self) -> Vec<u8> {
        self.buf
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.buf[i..i + 4]);
        Some(out)
    }
}
