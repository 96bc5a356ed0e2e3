use std::time::Duration;

use crate::foundation::error::{GlyphcastError, GlyphcastResult};

/// An 8-bit RGB triple, the pixel currency of every renderer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mean channel brightness used for ramp indexing and thresholds.
    pub fn brightness(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }

    pub fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// Terminal dimensions in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TermSize {
    pub cols: u16,
    pub rows: u16, // both must be > 0
}

impl TermSize {
    pub fn new(cols: u16, rows: u16) -> GlyphcastResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(GlyphcastError::config("terminal size must be non-zero"));
        }
        Ok(Self { cols, rows })
    }
}

/// Rational frame rate, e.g. 30000/1001 for NTSC material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> GlyphcastResult<Self> {
        if den == 0 {
            return Err(GlyphcastError::config("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GlyphcastError::config("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frame_duration(self) -> Duration {
        Duration::from_secs_f64(self.frame_duration_secs())
    }
}
