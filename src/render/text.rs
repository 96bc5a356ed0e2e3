//! Character-ramp renderer: one glyph per terminal cell, picked by brightness.

use image::{DynamicImage, imageops::FilterType};

use crate::color::ansi;
use crate::foundation::core::{Rgb, TermSize};
use crate::foundation::error::{GlyphcastError, GlyphcastResult};
use crate::render::renderer::{GlyphRenderer, RenderOptions, apply_frame_color};
use crate::render::threshold::otsu_threshold;

/// Maps mean channel brightness linearly onto an ordered glyph ramp
/// (darkest glyph first). With `transparent` set, pixels below an adaptive
/// Otsu-derived threshold become blank instead of the darkest ramp glyph,
/// so near-black regions stop rendering as solid rectangles.
#[derive(Debug)]
pub struct TextRenderer {
    ramp: Vec<char>,
    options: RenderOptions,
}

impl TextRenderer {
    pub fn new(ramp: &str, options: RenderOptions) -> GlyphcastResult<Self> {
        let ramp: Vec<char> = ramp.chars().collect();
        if ramp.len() < 2 {
            return Err(GlyphcastError::config(
                "text ramp must contain at least two glyphs",
            ));
        }
        Ok(Self { ramp, options })
    }

    fn glyph_for(&self, brightness: f64, step: f64) -> char {
        let idx = ((brightness / step) as usize).min(self.ramp.len() - 1);
        self.ramp[idx]
    }

    fn render_color(&self, img: &DynamicImage, step: f64) -> String {
        let rgb = img.to_rgb8();
        let threshold = if self.options.transparent {
            (f64::from(otsu_threshold(&img.to_luma8())) * 0.4).max(10.0)
        } else {
            0.0
        };

        let (w, h) = rgb.dimensions();
        let mut out = String::new();
        for y in 0..h {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..w {
                let p = rgb.get_pixel(x, y).0;
                let px = Rgb::new(p[0], p[1], p[2]);
                let brightness = px.brightness();
                if (self.options.transparent && brightness < threshold) || px.is_black() {
                    out.push(' ');
                } else {
                    out.push_str(&ansi::fg(px));
                    out.push(self.glyph_for(brightness, step));
                }
            }
        }
        out.push_str(ansi::RESET);
        out
    }

    fn render_grayscale(&self, img: &DynamicImage, step: f64) -> String {
        let gray = img.to_luma8();
        let threshold = if self.options.transparent {
            (f64::from(otsu_threshold(&gray)) * 0.2).max(10.0)
        } else {
            0.0
        };

        let (w, h) = gray.dimensions();
        let mut out = String::new();
        for y in 0..h {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..w {
                let value = f64::from(gray.get_pixel(x, y).0[0]);
                if self.options.transparent && value < threshold {
                    out.push(' ');
                } else {
                    out.push(self.glyph_for(value, step));
                }
            }
        }
        apply_frame_color(out, self.options.frame_color)
    }
}

impl GlyphRenderer for TextRenderer {
    fn render(&self, img: &DynamicImage, size: TermSize) -> String {
        let resized = img.resize_exact(
            u32::from(size.cols),
            u32::from(size.rows),
            FilterType::Lanczos3,
        );
        let step = 255.0 / (self.ramp.len() - 1) as f64;
        let body = if self.options.color {
            self.render_color(&resized, step)
        } else {
            self.render_grayscale(&resized, step)
        };
        ansi::compress(&body)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
