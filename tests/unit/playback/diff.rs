use super::*;

use crate::color::ansi::{bg, fg};
use crate::foundation::core::Rgb;

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

#[test]
fn mode_names_parse() {
    assert_eq!("none".parse::<DiffMode>().unwrap(), DiffMode::None);
    assert_eq!("line".parse::<DiffMode>().unwrap(), DiffMode::Line);
    assert_eq!("char".parse::<DiffMode>().unwrap(), DiffMode::Char);
    assert!("full".parse::<DiffMode>().is_err());
}

#[test]
fn none_mode_rewrites_from_home_every_time() {
    let mut engine = DiffEngine::new(DiffMode::None);
    assert_eq!(engine.patch("ab\ncd"), "\x1b[Hab\ncd");
    assert_eq!(engine.patch("ab\ncd"), "\x1b[Hab\ncd");
}

#[test]
fn first_frame_is_always_written_in_full() {
    let mut engine = DiffEngine::new(DiffMode::Line);
    assert_eq!(engine.patch("ab\ncd"), "\x1b[Hab\ncd");
}

#[test]
fn line_mode_rewrites_only_changed_lines() {
    let mut engine = DiffEngine::new(DiffMode::Line);
    engine.patch("aaa\nbbb\nccc");
    let patch = engine.patch("aaa\nbXb\nccc");
    assert_eq!(patch, "\x1b[2;1HbXb");
}

#[test]
fn identical_frames_produce_empty_patches() {
    let mut engine = DiffEngine::new(DiffMode::Line);
    engine.patch("aaa\nbbb");
    assert_eq!(engine.patch("aaa\nbbb"), "");
}

#[test]
fn color_only_changes_are_not_redrawn() {
    // Same glyphs, different escapes: equality is visible-text only.
    let mut engine = DiffEngine::new(DiffMode::Line);
    engine.patch(&format!("{}A{}", fg(RED), RESET));
    assert_eq!(engine.patch(&format!("{}A{}", fg(BLUE), RESET)), "");
}

#[test]
fn extra_lines_are_appended() {
    let mut engine = DiffEngine::new(DiffMode::Line);
    engine.patch("aaa");
    assert_eq!(engine.patch("aaa\nbbb"), "\x1b[2;1Hbbb");
}

#[test]
fn char_mode_rewrites_single_cells() {
    let mut engine = DiffEngine::new(DiffMode::Char);
    engine.patch("ABCD");
    assert_eq!(engine.patch("AXCD"), "\x1b[1;2HX");
}

#[test]
fn char_mode_groups_contiguous_runs() {
    let mut engine = DiffEngine::new(DiffMode::Char);
    engine.patch("AAAA\nZZZZ");
    // One cursor move per run, not per cell.
    assert_eq!(engine.patch("BBAA\nZZYY"), "\x1b[1;1HBB\x1b[2;3HYY");
}

#[test]
fn char_mode_restates_colors_and_resets_after_runs() {
    let mut engine = DiffEngine::new(DiffMode::Char);
    engine.patch("AB");
    let patch = engine.patch(&format!("{}AZ{}", fg(RED), RESET));
    assert_eq!(patch, format!("\x1b[1;2H{}Z{}", fg(RED), RESET));
}

#[test]
fn char_mode_tracks_background_state() {
    let mut engine = DiffEngine::new(DiffMode::Char);
    engine.patch("AB");
    let current = format!("{}{}XY{}", bg(BLUE), fg(RED), RESET);
    let patch = engine.patch(&current);
    assert_eq!(
        patch,
        format!("\x1b[1;1H{}{}XY{}", bg(BLUE), fg(RED), RESET)
    );
}

/// Replays a patch onto a visible-text grid seeded with the previous frame.
fn apply_patch(prev: &str, patch: &str) -> String {
    let mut grid: Vec<Vec<char>> = crate::color::ansi::strip_ansi(prev)
        .split('\n')
        .map(|l| l.chars().collect())
        .collect();
    let (mut row, mut col) = (0usize, 0usize);
    for token in ansi::tokenize(patch) {
        match token {
            AnsiToken::Escape(code) if code.ends_with('H') => {
                let coords = &code[2..code.len() - 1];
                if coords.is_empty() {
                    (row, col) = (0, 0);
                } else {
                    let (r, c) = coords.split_once(';').unwrap();
                    row = r.parse::<usize>().unwrap() - 1;
                    col = c.parse::<usize>().unwrap() - 1;
                }
            }
            AnsiToken::Escape(_) => {}
            AnsiToken::Text(text) => {
                for ch in text.chars() {
                    if ch == '\n' {
                        row += 1;
                        col = 0;
                        continue;
                    }
                    while grid.len() <= row {
                        grid.push(Vec::new());
                    }
                    while grid[row].len() <= col {
                        grid[row].push(' ');
                    }
                    grid[row][col] = ch;
                    col += 1;
                }
            }
        }
    }
    grid.iter()
        .map(|l| l.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn applied_patches_reproduce_the_visible_frame() {
    let prev = format!("{}##..{}\n....\n{}ZZZZ{}", fg(RED), RESET, bg(BLUE), RESET);
    let cur = format!("{}#..#{}\n.XX.\n{}ZZYY{}", fg(BLUE), RESET, bg(BLUE), RESET);
    for mode in [DiffMode::Line, DiffMode::Char] {
        let mut engine = DiffEngine::new(mode);
        engine.patch(&prev);
        let patch = engine.patch(&cur);
        assert_eq!(
            apply_patch(&prev, &patch),
            crate::color::ansi::strip_ansi(&cur),
            "mode {mode:?}"
        );
    }
}

#[test]
fn reset_forces_a_full_rewrite() {
    let mut engine = DiffEngine::new(DiffMode::Line);
    engine.patch("aaa");
    engine.reset();
    assert_eq!(engine.patch("aaa"), "\x1b[Haaa");
}
