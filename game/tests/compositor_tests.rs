use engine::codec::RgbaImage;
use engine::digest::rgba_sha256_hex;
use engine::graphics::{BLACK, WHITE};
use engine::surface::{RgbaBufferSurface, SurfaceSize};
use game::compositor::{self, COMPOSITE_SIZE};
use game::grid::{GUIDE_COLOR, WORD_COUNT};
use game::snapshot::Snapshot;

const BLANK_BOARD_SHA256: &str =
    "36a3ec71e46bc222f0b5494541d6ddfcce44c7e82e0765de0e1ba50c5c89d51d";

fn solid_cell(size: u32, color: [u8; 4]) -> Snapshot {
    let surface = RgbaBufferSurface::filled(SurfaceSize::new(size, size), color);
    Snapshot::from_png(
        RgbaImage::from_surface(&surface)
            .encode_png()
            .expect("encode cell"),
    )
}

/// Decodes with `png` directly rather than the engine codec, so the composite is checked
/// against an independent reader.
fn decode(snapshot: &Snapshot) -> (SurfaceSize, Vec<u8>) {
    let decoder = png::Decoder::new(std::io::Cursor::new(snapshot.as_bytes()));
    let mut reader = decoder.read_info().expect("png header");
    let size = {
        let info = reader.info();
        SurfaceSize::new(info.width, info.height)
    };
    let mut buf = vec![0; size.rgba_len()];
    let frame = reader.next_frame(&mut buf).expect("png frame");
    assert_eq!(frame.color_type, png::ColorType::Rgba);
    assert_eq!(frame.bit_depth, png::BitDepth::Eight);
    (size, buf)
}

fn pixel(rgba: &[u8], x: u32, y: u32) -> [u8; 4] {
    let i = ((y * COMPOSITE_SIZE.width + x) * 4) as usize;
    [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
}

#[tokio::test]
async fn empty_board_matches_golden_digest() {
    let cells = vec![None; WORD_COUNT];
    let board = compositor::composite(&cells).await.expect("composite");
    let (size, rgba) = decode(&board);

    assert_eq!(size, SurfaceSize::new(1500, 1200));
    assert_eq!(rgba_sha256_hex(&rgba), BLANK_BOARD_SHA256);
    assert_eq!(
        rgba_sha256_hex(compositor::blank_board().frame()),
        BLANK_BOARD_SHA256
    );
}

#[tokio::test]
async fn cell_seven_lands_in_column_two_row_one() {
    let mut cells = vec![None; WORD_COUNT];
    cells[7] = Some(solid_cell(300, BLACK));
    let board = compositor::composite(&cells).await.expect("composite");
    let (_, rgba) = decode(&board);

    assert_eq!(pixel(&rgba, 750, 450), BLACK);
    assert_eq!(pixel(&rgba, 605, 305), BLACK);
    assert_eq!(pixel(&rgba, 150, 150), WHITE);
    assert_eq!(pixel(&rgba, 1050, 450), WHITE);
    assert_eq!(pixel(&rgba, 750, 150), WHITE);
    // The guide band below row 0 is still visible outside the painted cell.
    assert_eq!(pixel(&rgba, 150, 299), GUIDE_COLOR);
}

#[tokio::test]
async fn small_cells_are_scaled_to_fill_their_slot() {
    let mut cells = vec![None; WORD_COUNT];
    cells[0] = Some(solid_cell(10, [200, 0, 0, 255]));
    let board = compositor::composite(&cells).await.expect("composite");
    let (_, rgba) = decode(&board);

    assert_eq!(pixel(&rgba, 0, 0), [200, 0, 0, 255]);
    assert_eq!(pixel(&rgba, 298, 298), [200, 0, 0, 255]);
    assert_eq!(pixel(&rgba, 302, 302), WHITE);
}

#[tokio::test]
async fn compositing_is_deterministic() {
    let mut cells = vec![None; WORD_COUNT];
    for index in [0, 4, 13, 19] {
        cells[index] = Some(solid_cell(300, [index as u8 * 10, 80, 40, 255]));
    }
    let a = compositor::composite(&cells).await.expect("first");
    let b = compositor::composite(&cells).await.expect("second");
    assert_eq!(decode(&a).1, decode(&b).1);
}
