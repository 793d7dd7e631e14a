use engine::codec::{RgbaImage, decode_png, encode_png};
use engine::digest::rgba_sha256_hex;
use engine::geometry::{Point, Rect};
use engine::graphics::{BLACK, CpuRenderer, Renderer2d, WHITE};
use engine::surface::{RgbaBufferSurface, SurfaceSize};

fn black_pixels(surface: &RgbaBufferSurface) -> usize {
    surface
        .frame()
        .chunks_exact(4)
        .filter(|px| *px == BLACK)
        .count()
}

#[test]
fn chained_segments_join_without_gaps() {
    let size = SurfaceSize::new(40, 40);
    let mut surface = RgbaBufferSurface::filled(size, WHITE);
    {
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.stroke_segment(Point::new(5.0, 5.0), Point::new(20.0, 5.0), 3.0, BLACK);
        gfx.stroke_segment(Point::new(20.0, 5.0), Point::new(20.0, 30.0), 3.0, BLACK);
    }

    // Corner of the polyline is covered.
    assert_eq!(surface.pixel(20, 5), Some(BLACK));
    assert_eq!(surface.pixel(19, 5), Some(BLACK));
    assert_eq!(surface.pixel(20, 6), Some(BLACK));
    // Every row along the vertical leg is painted.
    for y in 5..=29 {
        assert_eq!(surface.pixel(20, y), Some(BLACK), "gap at y={y}");
    }
}

#[test]
fn zero_length_segment_leaves_a_dot() {
    let size = SurfaceSize::new(10, 10);
    let mut surface = RgbaBufferSurface::filled(size, WHITE);
    {
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.stroke_segment(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 3.0, BLACK);
    }
    assert_eq!(surface.pixel(5, 5), Some(BLACK));
    assert!(black_pixels(&surface) > 1);
    assert!(black_pixels(&surface) < 16);
}

#[test]
fn clear_overwrites_previous_content() {
    let size = SurfaceSize::new(16, 16);
    let mut surface = RgbaBufferSurface::filled(size, WHITE);
    {
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.stroke_segment(Point::new(0.0, 0.0), Point::new(16.0, 16.0), 3.0, BLACK);
        gfx.clear(WHITE);
    }
    assert_eq!(black_pixels(&surface), 0);
}

#[test]
fn rendered_frame_survives_png_and_keeps_its_digest() {
    let size = SurfaceSize::new(32, 24);
    let mut surface = RgbaBufferSurface::filled(size, WHITE);
    {
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.fill_rect(Rect::new(4, 4, 8, 8), [148, 163, 184, 255]);
        gfx.stroke_segment(Point::new(2.0, 20.0), Point::new(30.0, 3.0), 3.0, BLACK);
    }

    let bytes = encode_png(size, surface.frame()).expect("encode");
    let decoded = decode_png(&bytes).expect("decode");

    assert_eq!(decoded.size(), size);
    assert_eq!(rgba_sha256_hex(decoded.rgba()), rgba_sha256_hex(surface.frame()));
}

#[test]
fn draw_image_into_offset_cell_leaves_neighbours_untouched() {
    let cell = RgbaImage::from_surface(&RgbaBufferSurface::filled(
        SurfaceSize::new(10, 10),
        [200, 0, 0, 255],
    ));

    let size = SurfaceSize::new(60, 40);
    let mut surface = RgbaBufferSurface::filled(size, WHITE);
    {
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.draw_image(&cell, Rect::new(20, 20, 20, 20));
    }

    assert_eq!(surface.pixel(20, 20), Some([200, 0, 0, 255]));
    assert_eq!(surface.pixel(39, 39), Some([200, 0, 0, 255]));
    assert_eq!(surface.pixel(19, 20), Some(WHITE));
    assert_eq!(surface.pixel(40, 20), Some(WHITE));
    assert_eq!(surface.pixel(20, 19), Some(WHITE));
}
