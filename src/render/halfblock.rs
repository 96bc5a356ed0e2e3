//! Half-block renderer: two vertically stacked pixels per terminal cell.

use image::{DynamicImage, imageops::FilterType};

use crate::color::ansi;
use crate::foundation::core::{Rgb, TermSize};
use crate::render::renderer::{GlyphRenderer, RenderOptions};
use crate::render::threshold::otsu_threshold;

/// Lower half block. Background paints the upper pixel, foreground the lower.
const LOWER_HALF: char = '\u{2584}';

/// Packs a (cols x rows*2) raster into (cols x rows) cells by pairing rows
/// `2y`/`2y+1` into one `▄` glyph with independent bg/fg truecolor escapes.
/// With `transparent` set, a cell whose pair-average brightness falls below
/// the whole-frame Otsu threshold renders as a reset plus a plain space, so
/// a prior cell's background cannot bleed into the gap.
#[derive(Debug)]
pub struct HalfBlockRenderer {
    options: RenderOptions,
}

impl HalfBlockRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl GlyphRenderer for HalfBlockRenderer {
    fn render(&self, img: &DynamicImage, size: TermSize) -> String {
        // Threshold comes from the unresized frame so downsampling noise
        // does not move the split point.
        let threshold = if self.options.transparent {
            (f64::from(otsu_threshold(&img.to_luma8())) * 0.4).max(10.0)
        } else {
            0.0
        };

        let rgb = img
            .resize_exact(
                u32::from(size.cols),
                u32::from(size.rows) * 2,
                FilterType::Lanczos3,
            )
            .to_rgb8();
        let (w, h) = rgb.dimensions();

        let mut rows = Vec::with_capacity(size.rows as usize);
        let mut y = 0;
        while y < h {
            let lower_y = (y + 1).min(h - 1);
            let mut row = String::new();
            for x in 0..w {
                let up = rgb.get_pixel(x, y).0;
                let upper = Rgb::new(up[0], up[1], up[2]);
                let lo = rgb.get_pixel(x, lower_y).0;
                let lower = Rgb::new(lo[0], lo[1], lo[2]);

                if self.options.transparent {
                    let pair_avg = (upper.brightness() + lower.brightness()) / 2.0;
                    if pair_avg < threshold {
                        row.push_str(ansi::RESET);
                        row.push(' ');
                        continue;
                    }
                    if upper.is_black() && lower.is_black() {
                        row.push(' ');
                        continue;
                    }
                }

                row.push_str(&ansi::bg(upper));
                row.push_str(&ansi::fg(lower));
                row.push(LOWER_HALF);
            }
            row.push_str(ansi::RESET);
            rows.push(row);
            y += 2;
        }

        ansi::compress(&rows.join("\n"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/halfblock.rs"]
mod tests;
