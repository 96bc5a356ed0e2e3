use super::*;

fn gray_frame(value: u8) -> DynamicImage {
    DynamicImage::ImageLuma8(image::GrayImage::from_pixel(8, 8, image::Luma([value])))
}

fn one_cell() -> TermSize {
    TermSize::new(1, 1).unwrap()
}

#[test]
fn bright_block_lights_all_eight_dots() {
    let r = BrailleRenderer::new(RenderOptions::default());
    // Uniform image gives the degenerate 128 threshold; 255 clears it.
    assert_eq!(r.render(&gray_frame(255), one_cell()), "\u{28FF}");
}

#[test]
fn dark_block_renders_as_space_not_blank_braille() {
    let r = BrailleRenderer::new(RenderOptions::default());
    assert_eq!(r.render(&gray_frame(0), one_cell()), " ");
}

#[test]
fn transparent_raises_the_dot_floor() {
    // 120 sits between 128 * 0.8 and 128 * 1.2: lit normally, blank when
    // transparency tightens the threshold.
    let normal = BrailleRenderer::new(RenderOptions::default());
    assert_eq!(normal.render(&gray_frame(120), one_cell()), "\u{28FF}");

    let transparent = BrailleRenderer::new(RenderOptions {
        transparent: true,
        ..RenderOptions::default()
    });
    assert_eq!(transparent.render(&gray_frame(120), one_cell()), " ");
}

#[test]
fn color_mode_paints_the_average_of_lit_pixels() {
    let white = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        8,
        8,
        image::Rgb([255, 255, 255]),
    ));
    let r = BrailleRenderer::new(RenderOptions {
        color: true,
        ..RenderOptions::default()
    });
    assert_eq!(
        r.render(&white, one_cell()),
        "\x1b[38;2;255;255;255m\u{28FF}\x1b[0m"
    );
}

#[test]
fn rows_are_newline_joined() {
    let r = BrailleRenderer::new(RenderOptions::default());
    let out = r.render(&gray_frame(255), TermSize::new(2, 2).unwrap());
    assert_eq!(out, "\u{28FF}\u{28FF}\n\u{28FF}\u{28FF}");
}
