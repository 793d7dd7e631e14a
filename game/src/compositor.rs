//! Assembles per-cell snapshots into one 5x4 board image.
//!
//! Decoding is scatter/gather: every present cell is decoded on its own blocking task and the
//! board is only painted once all of them succeed. The first failure aborts the remaining
//! decodes and fails the whole call.

use std::fmt;

use engine::codec::{CodecError, RgbaImage, encode_png};
use engine::graphics::{CpuRenderer, Renderer2d, WHITE};
use engine::surface::{RgbaBufferSurface, SurfaceSize};
use tokio::task::JoinSet;

use crate::grid::{self, COLUMNS, ROWS, WORD_COUNT};
use crate::snapshot::Snapshot;

pub const CELL_SIZE: u32 = 300;
pub const COMPOSITE_SIZE: SurfaceSize = SurfaceSize::new(CELL_SIZE * COLUMNS, CELL_SIZE * ROWS);

const GUIDE_LINE_WIDTH: u32 = 2;

#[derive(Debug)]
pub enum CompositeError {
    CellCount { found: usize },
    CellDecode { index: usize, source: CodecError },
    /// A decode task panicked or was cancelled.
    Join(String),
    Encode(CodecError),
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeError::CellCount { found } => {
                write!(f, "expected exactly {WORD_COUNT} cell images, got {found}")
            }
            CompositeError::CellDecode { index, source } => {
                write!(f, "failed to decode cell image {index}: {source}")
            }
            CompositeError::Join(reason) => write!(f, "cell decode task did not finish: {reason}"),
            CompositeError::Encode(e) => write!(f, "failed to encode composite: {e}"),
        }
    }
}

impl std::error::Error for CompositeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompositeError::CellDecode { source, .. } => Some(source),
            CompositeError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

/// White board with the 2px guide grid and no cells.
pub fn blank_board() -> RgbaBufferSurface {
    let mut board = RgbaBufferSurface::new(COMPOSITE_SIZE);
    let mut gfx = CpuRenderer::new(board.frame_mut(), COMPOSITE_SIZE);
    gfx.clear(WHITE);
    grid::draw_guide_lines(&mut gfx, GUIDE_LINE_WIDTH);
    board
}

/// Paints already-decoded cells over a blank board. `cells[i]` lands in cell `i`.
pub fn paint_cells(cells: &[Option<RgbaImage>]) -> RgbaBufferSurface {
    let mut board = blank_board();
    let mut gfx = CpuRenderer::new(board.frame_mut(), COMPOSITE_SIZE);
    for (index, cell) in cells.iter().enumerate().take(WORD_COUNT) {
        if let Some(image) = cell {
            gfx.draw_image(image, grid::cell_rect(index, CELL_SIZE, CELL_SIZE));
        }
    }
    board
}

/// Decodes all present cells concurrently. All-or-nothing.
pub async fn decode_cells(
    cells: &[Option<Snapshot>],
) -> Result<Vec<Option<RgbaImage>>, CompositeError> {
    let mut tasks = JoinSet::new();
    for (index, cell) in cells.iter().enumerate() {
        if let Some(snapshot) = cell.clone() {
            tasks.spawn_blocking(move || (index, snapshot.decode()));
        }
    }

    let mut decoded: Vec<Option<RgbaImage>> = vec![None; cells.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = match joined {
            Ok(done) => done,
            Err(err) => {
                tasks.abort_all();
                return Err(CompositeError::Join(err.to_string()));
            }
        };
        match result {
            Ok(image) => decoded[index] = Some(image),
            Err(source) => {
                tasks.abort_all();
                return Err(CompositeError::CellDecode { index, source });
            }
        }
    }
    Ok(decoded)
}

/// Builds the 1500x1200 board image from exactly `WORD_COUNT` optional cell snapshots.
pub async fn composite(cells: &[Option<Snapshot>]) -> Result<Snapshot, CompositeError> {
    if cells.len() != WORD_COUNT {
        return Err(CompositeError::CellCount { found: cells.len() });
    }

    let decoded = decode_cells(cells).await?;
    let present = decoded.iter().filter(|c| c.is_some()).count();
    log::debug!("compositing {present}/{WORD_COUNT} cells");

    let board = paint_cells(&decoded);
    let png = encode_png(board.size(), board.frame()).map_err(CompositeError::Encode)?;
    Ok(Snapshot::from_png(png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_board_has_fixed_size_and_guides() {
        let board = blank_board();
        assert_eq!(board.size(), SurfaceSize::new(1500, 1200));
        assert_eq!(board.pixel(150, 150), Some(WHITE));
        assert_eq!(board.pixel(150, 299), Some(grid::GUIDE_COLOR));
        assert_eq!(board.pixel(300, 150), Some(grid::GUIDE_COLOR));
    }

    #[tokio::test]
    async fn wrong_cell_count_is_rejected() {
        let cells = vec![None; 19];
        let err = composite(&cells).await.expect_err("19 cells");
        assert!(matches!(err, CompositeError::CellCount { found: 19 }));
    }

    #[tokio::test]
    async fn one_bad_cell_fails_everything() {
        let good = Snapshot::from_png(
            RgbaImage::from_surface(&RgbaBufferSurface::filled(
                SurfaceSize::new(4, 4),
                [9, 9, 9, 255],
            ))
            .encode_png()
            .expect("encode"),
        );
        let mut cells = vec![None; WORD_COUNT];
        cells[0] = Some(good.clone());
        cells[3] = Some(Snapshot::from_png(b"not an image".to_vec()));
        cells[12] = Some(good);

        let err = composite(&cells).await.expect_err("bad cell");
        assert!(matches!(err, CompositeError::CellDecode { index: 3, .. }));
    }
}
