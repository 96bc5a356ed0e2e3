//! Truecolor escape helpers and the per-line escape-sequence compressor.
//!
//! Everything here is a pure function over strings: no caching, no global
//! state. Color codes are cheap to format, so there is deliberately no
//! per-pixel memoization layer.

use crate::foundation::core::Rgb;

/// Resets all color state.
pub const RESET: &str = "\x1b[0m";

/// Truecolor foreground escape for `color`.
pub fn fg(color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

/// Truecolor background escape for `color`.
pub fn bg(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

/// Truncating integer mean of a pixel list. Empty input yields black.
pub fn average_color(colors: &[Rgb]) -> Rgb {
    if colors.is_empty() {
        return Rgb::BLACK;
    }
    let n = colors.len() as u32;
    let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
    for c in colors {
        r += u32::from(c.r);
        g += u32::from(c.g);
        b += u32::from(c.b);
    }
    Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
}

/// One lexical token of a rendered line: either a complete CSI escape
/// sequence or a run of literal text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AnsiToken<'a> {
    Escape(&'a str),
    Text(&'a str),
}

/// Splits a line into alternating escape/text tokens without reordering.
///
/// An escape runs from `ESC [` through the first final byte in `@`..`~`.
/// An unterminated `ESC [` is treated as literal text, matching how a
/// terminal would garble it anyway.
pub(crate) fn tokenize(line: &str) -> Vec<AnsiToken<'_>> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == 0x1b && i + 1 < bytes.len() && bytes[i + 1] == b'[' {
            let mut j = i + 2;
            while j < bytes.len() && !(0x40..=0x7e).contains(&bytes[j]) {
                j += 1;
            }
            if j < bytes.len() {
                if text_start < i {
                    tokens.push(AnsiToken::Text(&line[text_start..i]));
                }
                tokens.push(AnsiToken::Escape(&line[i..=j]));
                i = j + 1;
                text_start = i;
                continue;
            }
        }
        i += line[i..].chars().next().map_or(1, char::len_utf8);
    }

    if text_start < line.len() {
        tokens.push(AnsiToken::Text(&line[text_start..]));
    }
    tokens
}

/// Removes every escape sequence, leaving only visible glyphs.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split('\n') {
        if !out.is_empty() {
            out.push('\n');
        }
        if !line.contains('\x1b') {
            out.push_str(line);
            continue;
        }
        for token in tokenize(line) {
            if let AnsiToken::Text(t) = token {
                out.push_str(t);
            }
        }
    }
    out
}

/// Compresses redundant color escapes out of rendered frame text.
///
/// Streaming state machine per line: literal text is buffered while the
/// current foreground/background codes are tracked; a repeated code of the
/// same category merges into one emission ahead of the buffered text. A reset
/// clears both states and is always preserved. A line that ends with color
/// state still active gets a trailing reset so nothing bleeds into the next
/// line or frame. Stripping escapes from the result equals stripping escapes
/// from the input.
pub fn compress(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut lines = Vec::new();
    for line in text.split('\n') {
        lines.push(compress_line(line));
    }
    lines.join("\n")
}

fn compress_line(line: &str) -> String {
    if !line.contains('\x1b') {
        return line.to_string();
    }

    fn flush(out: &mut String, buf: &mut String, bg: Option<&str>, fg: Option<&str>) {
        if buf.is_empty() {
            return;
        }
        if let Some(code) = bg {
            out.push_str(code);
        }
        if let Some(code) = fg {
            out.push_str(code);
        }
        out.push_str(buf);
        buf.clear();
    }

    let mut out = String::with_capacity(line.len());
    let mut buf = String::new();
    let mut cur_bg: Option<&str> = None;
    let mut cur_fg: Option<&str> = None;

    for token in tokenize(line) {
        match token {
            AnsiToken::Text(t) => buf.push_str(t),
            AnsiToken::Escape(code) if code == RESET => {
                flush(&mut out, &mut buf, cur_bg, cur_fg);
                out.push_str(RESET);
                cur_bg = None;
                cur_fg = None;
            }
            AnsiToken::Escape(code) if code.starts_with("\x1b[48;") && code.ends_with('m') => {
                if cur_bg != Some(code) {
                    flush(&mut out, &mut buf, cur_bg, cur_fg);
                }
                cur_bg = Some(code);
            }
            AnsiToken::Escape(code) if code.starts_with("\x1b[38;") && code.ends_with('m') => {
                if cur_fg != Some(code) {
                    flush(&mut out, &mut buf, cur_bg, cur_fg);
                }
                cur_fg = Some(code);
            }
            AnsiToken::Escape(code) => {
                flush(&mut out, &mut buf, cur_bg, cur_fg);
                out.push_str(code);
            }
        }
    }
    flush(&mut out, &mut buf, cur_bg, cur_fg);

    if (cur_bg.is_some() || cur_fg.is_some()) && !out.ends_with(RESET) {
        out.push_str(RESET);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/color/ansi.rs"]
mod tests;
