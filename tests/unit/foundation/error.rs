use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlyphcastError::UnknownStyle("sketch".into())
            .to_string()
            .contains("unknown render style 'sketch'")
    );
    assert!(
        GlyphcastError::config("bad fps")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        GlyphcastError::audio("device gone")
            .to_string()
            .contains("audio playback error:")
    );
}

#[test]
fn frame_errors_carry_index_and_path() {
    let missing = GlyphcastError::FrameMissing {
        index: 41,
        path: PathBuf::from("frames/frame_0042.png"),
    };
    let text = missing.to_string();
    assert!(text.contains("frame 41 missing"));
    assert!(text.contains("frame_0042.png"));

    let render = GlyphcastError::frame_render("frames/frame_0001.png", "truncated image");
    let text = render.to_string();
    assert!(text.contains("frame_0001.png"));
    assert!(text.contains("truncated image"));
}

#[test]
fn io_errors_route_through_other() {
    let err = GlyphcastError::from(std::io::Error::other("boom"));
    assert!(matches!(err, GlyphcastError::Other(_)));
    assert!(err.to_string().contains("boom"));
}
