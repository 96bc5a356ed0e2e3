//! Terminal control bytes and size probing.
//!
//! The escape strings are contractual output: they are written verbatim, not
//! synthesized through a terminal library, so the emitted byte stream stays
//! identical across backends. Only the size query goes through `crossterm`.

use crate::foundation::core::TermSize;
use crate::foundation::error::{GlyphcastError, GlyphcastResult};

pub const CURSOR_HIDE: &str = "\x1b[?25l";
pub const CURSOR_SHOW: &str = "\x1b[?25h";
pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const CURSOR_HOME: &str = "\x1b[H";

/// 1-based absolute cursor positioning.
pub fn cursor_to(row: u16, col: u16) -> String {
    format!("\x1b[{row};{col}H")
}

/// Where the scheduler learns the terminal dimensions. Re-queried every tick
/// because the terminal may resize mid-playback.
pub trait TerminalProbe {
    fn size(&mut self) -> GlyphcastResult<TermSize>;
}

/// Live query against the controlling terminal.
pub struct CrosstermProbe;

impl TerminalProbe for CrosstermProbe {
    fn size(&mut self) -> GlyphcastResult<TermSize> {
        let (cols, rows) = crossterm::terminal::size()
            .map_err(|e| GlyphcastError::config(format!("terminal size query failed: {e}")))?;
        TermSize::new(cols, rows)
    }
}

/// Constant dimensions, for tests and non-tty sinks.
pub struct FixedProbe(pub TermSize);

impl TerminalProbe for FixedProbe {
    fn size(&mut self) -> GlyphcastResult<TermSize> {
        Ok(self.0)
    }
}
