//! Braille renderer: each cell encodes a 2x4 pixel block as dot patterns.

use image::{DynamicImage, imageops::FilterType};

use crate::color::ansi;
use crate::foundation::core::{Rgb, TermSize};
use crate::render::renderer::{GlyphRenderer, RenderOptions, apply_frame_color};
use crate::render::threshold::otsu_threshold;

/// First codepoint of the braille block; dot bits OR into it.
const BRAILLE_BASE: u32 = 0x2800;

/// Dot bit for sub-pixel (dx, dy), indexed `DOT_BITS[dy][dx]`. The layout
/// follows the standard braille dot numbering, where dots 7/8 form the
/// bottom row.
const DOT_BITS: [[u32; 2]; 4] = [
    [0x01, 0x08],
    [0x02, 0x10],
    [0x04, 0x20],
    [0x40, 0x80],
];

/// Renders 2x4 pixel blocks as braille glyphs using one adaptive threshold
/// per frame. A dot lights when its sub-pixel luma exceeds `threshold * 0.8`,
/// or `threshold * 1.2` with `transparent` set (sparser dots against noise).
/// Cells with zero lit dots render as a space rather than the blank braille
/// glyph, which would still read as a distinct cell.
#[derive(Debug)]
pub struct BrailleRenderer {
    options: RenderOptions,
}

impl BrailleRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl GlyphRenderer for BrailleRenderer {
    fn render(&self, img: &DynamicImage, size: TermSize) -> String {
        let resized = img.resize_exact(
            u32::from(size.cols) * 2,
            u32::from(size.rows) * 4,
            FilterType::Lanczos3,
        );
        let gray = resized.to_luma8();
        let rgb = resized.to_rgb8();

        let threshold = f64::from(otsu_threshold(&gray));
        let dot_threshold = threshold * if self.options.transparent { 1.2 } else { 0.8 };

        let (w, h) = gray.dimensions();
        let cells_x = (w / 2).max(1);
        let cells_y = (h / 4).max(1);

        let mut rows = Vec::with_capacity(cells_y as usize);
        for cy in 0..cells_y {
            let mut row = String::new();
            for cx in 0..cells_x {
                let mut code = 0u32;
                let mut lit: Vec<Rgb> = Vec::new();

                for dy in 0..4u32 {
                    for dx in 0..2u32 {
                        let px = cx * 2 + dx;
                        let py = cy * 4 + dy;
                        if px >= w || py >= h {
                            continue;
                        }
                        if f64::from(gray.get_pixel(px, py).0[0]) > dot_threshold {
                            code |= DOT_BITS[dy as usize][dx as usize];
                            let p = rgb.get_pixel(px, py).0;
                            lit.push(Rgb::new(p[0], p[1], p[2]));
                        }
                    }
                }

                if lit.is_empty() {
                    row.push(' ');
                    continue;
                }
                let glyph = char::from_u32(BRAILLE_BASE | code).unwrap_or(' ');
                if self.options.color {
                    row.push_str(&ansi::fg(ansi::average_color(&lit)));
                    row.push(glyph);
                    row.push_str(ansi::RESET);
                } else {
                    row.push(glyph);
                }
            }
            rows.push(row);
        }

        let body = apply_frame_color(rows.join("\n"), self.options.frame_color);
        ansi::compress(&body)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/braille.rs"]
mod tests;
