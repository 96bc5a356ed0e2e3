use super::*;

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

#[test]
fn escape_formats_are_stable() {
    assert_eq!(fg(RED), "\x1b[38;2;255;0;0m");
    assert_eq!(bg(BLUE), "\x1b[48;2;0;0;255m");
    assert_eq!(RESET, "\x1b[0m");
}

#[test]
fn average_color_truncates_and_defaults_to_black() {
    assert_eq!(average_color(&[]), Rgb::BLACK);
    let avg = average_color(&[Rgb::new(255, 0, 10), Rgb::new(0, 0, 11)]);
    assert_eq!(avg, Rgb::new(127, 0, 10));
}

#[test]
fn strip_removes_escapes_and_keeps_lines() {
    let line = format!("{}ab{}\n{}cd", fg(RED), RESET, bg(BLUE));
    assert_eq!(strip_ansi(&line), "ab\ncd");
    assert_eq!(strip_ansi("plain"), "plain");
}

#[test]
fn unterminated_escape_is_literal_text() {
    assert_eq!(strip_ansi("x\x1b[38;2;1"), "x\x1b[38;2;1");
}

#[test]
fn repeated_codes_merge_into_one() {
    let input = format!("{}a{}b", fg(RED), fg(RED));
    assert_eq!(compress(&input), format!("{}ab{}", fg(RED), RESET));
}

#[test]
fn background_is_emitted_before_foreground() {
    let input = format!("{}{}x", fg(RED), bg(BLUE));
    assert_eq!(compress(&input), format!("{}{}x{}", bg(BLUE), fg(RED), RESET));
}

#[test]
fn existing_reset_is_not_doubled() {
    let input = format!("{}a{}", fg(RED), RESET);
    let out = compress(&input);
    assert_eq!(out, input);
    assert!(!out.ends_with("\x1b[0m\x1b[0m"));
}

#[test]
fn reset_clears_tracked_state() {
    // After a reset, re-stating the same color must be re-emitted.
    let input = format!("{}a{}{}b", fg(RED), RESET, fg(RED));
    assert_eq!(
        compress(&input),
        format!("{}a{}{}b{}", fg(RED), RESET, fg(RED), RESET)
    );
}

#[test]
fn compression_preserves_visible_text() {
    let frame = format!(
        "{}{}ab{}c{}\n plain \n{}{} x{}y",
        bg(BLUE),
        fg(RED),
        fg(RED),
        RESET,
        fg(RED),
        bg(BLUE),
        fg(BLUE),
    );
    assert_eq!(strip_ansi(&compress(&frame)), strip_ansi(&frame));
}

#[test]
fn every_compressed_line_ends_color_clean() {
    let frame = format!("{}a\n{}b{}\nplain", fg(RED), bg(BLUE), fg(RED));
    for line in compress(&frame).split('\n') {
        let has_color = line.contains("\x1b[38;") || line.contains("\x1b[48;");
        assert!(!has_color || line.ends_with(RESET), "bleeding line: {line:?}");
    }
}

#[test]
fn empty_input_stays_empty() {
    assert_eq!(compress(""), "");
}
