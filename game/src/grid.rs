//! The fixed 5x4 board every session draws into.

use engine::geometry::Rect;
use engine::graphics::{Color, Renderer2d};

pub const COLUMNS: u32 = 5;
pub const ROWS: u32 = 4;
pub const WORD_COUNT: usize = (COLUMNS * ROWS) as usize;

pub const GUIDE_COLOR: Color = [148, 163, 184, 255];

/// `(column, row)` of a cell, row-major.
pub fn cell_position(index: usize) -> (u32, u32) {
    let index = index as u32;
    (index % COLUMNS, index / COLUMNS)
}

pub fn cell_rect(index: usize, cell_width: u32, cell_height: u32) -> Rect {
    let (column, row) = cell_position(index);
    Rect::new(column * cell_width, row * cell_height, cell_width, cell_height)
}

/// Draws the 3 horizontal and 4 vertical dividers of the grid.
///
/// A line of `line_width` at coordinate `c` covers pixels `c - line_width / 2` onwards.
pub fn draw_guide_lines<R: Renderer2d + ?Sized>(gfx: &mut R, line_width: u32) {
    let size = gfx.size();
    let offset = line_width / 2;

    for i in 1..ROWS {
        let y = size.height / ROWS * i;
        gfx.fill_rect(
            Rect::new(0, y.saturating_sub(offset), size.width, line_width),
            GUIDE_COLOR,
        );
    }
    for i in 1..COLUMNS {
        let x = size.width / COLUMNS * i;
        gfx.fill_rect(
            Rect::new(x.saturating_sub(offset), 0, line_width, size.height),
            GUIDE_COLOR,
        );
    }
}
