use image::DynamicImage;

use crate::color::ansi;
use crate::foundation::core::{Rgb, TermSize};

/// Style-independent knobs shared by every glyph renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderOptions {
    /// Emit truecolor escapes per glyph instead of plain text.
    pub color: bool,
    /// Optional frame-wide tint applied around uncolored output.
    pub frame_color: Option<Rgb>,
    /// Blank out pixels below an adaptive brightness threshold.
    pub transparent: bool,
}

/// The single rendering contract: one raster image in, one rendered frame out.
///
/// A rendered frame is a `\n`-joined grid of exactly `size.rows` rows of
/// `size.cols` visible glyph cells each, with any color escapes balanced by a
/// reset before the end of every row. It is produced once per
/// (frame, terminal size, style) and never mutated afterwards.
pub trait GlyphRenderer: Send + Sync + std::fmt::Debug {
    fn render(&self, img: &DynamicImage, size: TermSize) -> String;
}

/// Applies the frame tint to every row of `text` when one is configured.
///
/// Tinting per row keeps the escape-balance invariant: no color state ever
/// carries across a line boundary.
pub(crate) fn apply_frame_color(text: String, frame_color: Option<Rgb>) -> String {
    let Some(tint) = frame_color else {
        return text;
    };
    let code = ansi::fg(tint);
    let rows: Vec<String> = text
        .split('\n')
        .map(|row| format!("{code}{row}{}", ansi::RESET))
        .collect();
    rows.join("\n")
}
