use super::*;

use crate::color::ansi::strip_ansi;

fn red_over_green() -> DynamicImage {
    let mut img = image::RgbImage::new(1, 2);
    img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
    img.put_pixel(0, 1, image::Rgb([0, 255, 0]));
    DynamicImage::ImageRgb8(img)
}

#[test]
fn cell_is_bg_upper_fg_lower() {
    let r = HalfBlockRenderer::new(RenderOptions::default());
    let out = r.render(&red_over_green(), TermSize::new(1, 1).unwrap());
    assert_eq!(out, "\x1b[48;2;255;0;0m\x1b[38;2;0;255;0m\u{2584}\x1b[0m");
}

#[test]
fn every_row_ends_with_a_reset() {
    let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        4,
        8,
        image::Rgb([10, 200, 30]),
    ));
    let r = HalfBlockRenderer::new(RenderOptions::default());
    let out = r.render(&img, TermSize::new(4, 4).unwrap());
    assert_eq!(out.split('\n').count(), 4);
    for row in out.split('\n') {
        assert!(row.ends_with("\x1b[0m"), "row without reset: {row:?}");
    }
}

#[test]
fn transparent_dark_cells_drop_their_background() {
    let black = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        4,
        4,
        image::Rgb([0, 0, 0]),
    ));
    let r = HalfBlockRenderer::new(RenderOptions {
        transparent: true,
        ..RenderOptions::default()
    });
    let out = r.render(&black, TermSize::new(2, 1).unwrap());
    assert_eq!(strip_ansi(&out), "  ");
    assert!(!out.contains("\x1b[48;"), "background escaped: {out:?}");
}
