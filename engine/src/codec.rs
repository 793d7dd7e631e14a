//! Lossless image snapshots: an owned RGBA image plus PNG encode/decode.

use std::fmt;
use std::io::Cursor;

use crate::graphics::Color;
use crate::surface::{RgbaBufferSurface, SurfaceSize};

#[derive(Debug)]
pub enum CodecError {
    /// Pixel buffer length does not match `width * height * 4`.
    BufferSize { expected: usize, found: usize },
    Encode(png::EncodingError),
    Decode(png::DecodingError),
    UnsupportedColor(png::ColorType),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::BufferSize { expected, found } => {
                write!(f, "rgba buffer holds {found} bytes, expected {expected}")
            }
            CodecError::Encode(e) => write!(f, "png encode failed: {e}"),
            CodecError::Decode(e) => write!(f, "png decode failed: {e}"),
            CodecError::UnsupportedColor(c) => write!(f, "unsupported png color type {c:?}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Encode(e) => Some(e),
            CodecError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<png::EncodingError> for CodecError {
    fn from(e: png::EncodingError) -> Self {
        CodecError::Encode(e)
    }
}

impl From<png::DecodingError> for CodecError {
    fn from(e: png::DecodingError) -> Self {
        CodecError::Decode(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    size: SurfaceSize,
    rgba: Vec<u8>,
}

impl RgbaImage {
    pub fn new(size: SurfaceSize, rgba: Vec<u8>) -> Result<Self, CodecError> {
        let expected = size.rgba_len();
        if rgba.len() != expected {
            return Err(CodecError::BufferSize {
                expected,
                found: rgba.len(),
            });
        }
        Ok(Self { size, rgba })
    }

    pub fn from_surface(surface: &RgbaBufferSurface) -> Self {
        Self {
            size: surface.size(),
            rgba: surface.frame().to_vec(),
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.rgba[i..i + 4]);
        Some(out)
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        self.rgba[i..i + 4].copy_from_slice(&color);
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, CodecError> {
        encode_png(self.size, &self.rgba)
    }
}

pub fn encode_png(size: SurfaceSize, rgba: &[u8]) -> Result<Vec<u8>, CodecError> {
    let expected = size.rgba_len();
    if rgba.len() != expected {
        return Err(CodecError::BufferSize {
            expected,
            found: rgba.len(),
        });
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, size.width, size.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
        writer.finish()?;
    }
    Ok(out)
}

/// Decodes any 8/16-bit PNG into RGBA8.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(
        png::Transformations::EXPAND | png::Transformations::STRIP_16 | png::Transformations::ALPHA,
    );
    let mut reader = decoder.read_info()?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let size = SurfaceSize::new(width, height);
    let mut buf = vec![0u8; size.rgba_len()];
    let frame = reader.next_frame(&mut buf)?;
    let used = frame.line_size * frame.height as usize;
    buf.truncate(used);

    let rgba = match frame.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        other => return Err(CodecError::UnsupportedColor(other)),
    };
    RgbaImage::new(size, rgba)
}
