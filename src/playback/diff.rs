//! Incremental frame updates.
//!
//! Equality is judged on visible glyphs only: escape sequences are stripped
//! before comparison, so a cell that keeps its character but changes color is
//! not redrawn. That trade favors update size over color fidelity for
//! animated gradients; full redraws remain available via [`DiffMode::None`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::ansi::{self, AnsiToken, RESET};
use crate::foundation::error::{GlyphcastError, GlyphcastResult};
use crate::terminal::control::{CURSOR_HOME, cursor_to};

/// Update granularity between consecutive frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Rewrite the whole frame from the home position every tick.
    #[default]
    None,
    /// Rewrite only the lines whose visible text changed.
    Line,
    /// Rewrite only contiguous runs of changed cells within a line.
    Char,
}

impl FromStr for DiffMode {
    type Err = GlyphcastError;

    fn from_str(s: &str) -> GlyphcastResult<Self> {
        match s {
            "none" => Ok(Self::None),
            "line" => Ok(Self::Line),
            "char" => Ok(Self::Char),
            other => Err(GlyphcastError::config(format!(
                "unknown diff mode '{other}' (expected none, line or char)"
            ))),
        }
    }
}

/// Turns rendered frames into terminal byte deltas.
///
/// Holds the previously emitted frame; the first frame after construction or
/// [`DiffEngine::reset`] is always written in full.
#[derive(Debug)]
pub struct DiffEngine {
    mode: DiffMode,
    prev: Option<String>,
}

impl DiffEngine {
    pub fn new(mode: DiffMode) -> Self {
        Self { mode, prev: None }
    }

    pub fn mode(&self) -> DiffMode {
        self.mode
    }

    /// Forgets the previous frame, forcing the next patch to be a full write.
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Computes the byte string that brings the terminal from the previous
    /// frame to `current`.
    pub fn patch(&mut self, current: &str) -> String {
        if self.mode == DiffMode::None {
            return format!("{CURSOR_HOME}{current}");
        }
        let out = match self.prev.as_deref() {
            None => format!("{CURSOR_HOME}{current}"),
            Some(prev) => match self.mode {
                DiffMode::None => unreachable!(),
                DiffMode::Line => line_patch(prev, current),
                DiffMode::Char => char_patch(prev, current),
            },
        };
        self.prev = Some(current.to_owned());
        out
    }
}

fn line_patch(prev: &str, current: &str) -> String {
    let prev_lines: Vec<&str> = prev.split('\n').collect();
    let mut out = String::new();
    for (row, line) in current.split('\n').enumerate() {
        let unchanged = prev_lines
            .get(row)
            .is_some_and(|p| ansi::strip_ansi(p) == ansi::strip_ansi(line));
        if unchanged {
            continue;
        }
        out.push_str(&cursor_to(row as u16 + 1, 1));
        out.push_str(line);
    }
    out
}

/// One visible terminal cell with the color state active when it is drawn.
struct Cell<'a> {
    bg: Option<&'a str>,
    fg: Option<&'a str>,
    ch: char,
}

/// Expands a rendered line into per-cell glyphs and active colors.
fn visible_cells(line: &str) -> Vec<Cell<'_>> {
    let mut cells = Vec::new();
    let mut bg: Option<&str> = None;
    let mut fg: Option<&str> = None;
    for token in ansi::tokenize(line) {
        match token {
            AnsiToken::Escape(code) if code == RESET => {
                bg = None;
                fg = None;
            }
            AnsiToken::Escape(code) if code.starts_with("\x1b[48;") => bg = Some(code),
            AnsiToken::Escape(code) if code.starts_with("\x1b[38;") => fg = Some(code),
            AnsiToken::Escape(_) => {}
            AnsiToken::Text(text) => {
                for ch in text.chars() {
                    cells.push(Cell { bg, fg, ch });
                }
            }
        }
    }
    cells
}

fn char_patch(prev: &str, current: &str) -> String {
    let prev_lines: Vec<&str> = prev.split('\n').collect();
    let mut out = String::new();
    for (row, line) in current.split('\n').enumerate() {
        let Some(prev_line) = prev_lines.get(row) else {
            // Line beyond the previous frame: write it whole.
            out.push_str(&cursor_to(row as u16 + 1, 1));
            out.push_str(line);
            continue;
        };
        let prev_vis: Vec<char> = ansi::strip_ansi(prev_line).chars().collect();
        let cells = visible_cells(line);
        let mut col = 0;
        while col < cells.len() {
            let changed = |i: usize| prev_vis.get(i).is_none_or(|&p| p != cells[i].ch);
            if !changed(col) {
                col += 1;
                continue;
            }
            // A run of mismatched cells: one cursor move, then glyphs with
            // their colors restated from a clean state.
            out.push_str(&cursor_to(row as u16 + 1, col as u16 + 1));
            let mut cur_bg: Option<&str> = None;
            let mut cur_fg: Option<&str> = None;
            while col < cells.len() && changed(col) {
                let cell = &cells[col];
                if cell.bg != cur_bg || cell.fg != cur_fg {
                    let drops_color = (cur_bg.is_some() && cell.bg.is_none())
                        || (cur_fg.is_some() && cell.fg.is_none());
                    if drops_color {
                        out.push_str(RESET);
                        cur_bg = None;
                        cur_fg = None;
                    }
                    if cell.bg != cur_bg {
                        if let Some(code) = cell.bg {
                            out.push_str(code);
                        }
                    }
                    if cell.fg != cur_fg {
                        if let Some(code) = cell.fg {
                            out.push_str(code);
                        }
                    }
                    cur_bg = cell.bg;
                    cur_fg = cell.fg;
                }
                out.push(cell.ch);
                col += 1;
            }
            if cur_bg.is_some() || cur_fg.is_some() {
                out.push_str(RESET);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/playback/diff.rs"]
mod tests;
