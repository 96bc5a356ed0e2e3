//! Glyphcast is a terminal video playback engine.
//!
//! It turns a sequence of frame images into ANSI-colored character art and
//! plays it back in a terminal at the source frame rate.
//!
//! # Pipeline overview
//!
//! 1. **Provision**: a [`FrameSource`] yields a [`MediaStream`] (ordered PNG
//!    frames, optional soundtrack, detected frame rate)
//! 2. **Render**: a [`GlyphRenderer`] maps each frame to escape-coded text
//!    (ASCII ramps, braille dot cells, or half-block pixel pairs)
//! 3. **Compress**: redundant color escapes are squeezed out per line
//! 4. **Schedule**: [`PlaybackScheduler`] paces frames against ideal
//!    timestamps, skipping when the terminal falls behind
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **One terminal owner**: only the scheduler thread writes to the output;
//!   pre-render workers fill a cache and never touch the terminal.
//! - **Deterministic rendering**: a renderer is a pure function of the frame
//!   image and the terminal size.
//! - **Verbatim escapes**: control sequences are emitted as fixed byte
//!   strings, identical across platforms.
#![forbid(unsafe_code)]

mod color;
mod foundation;
mod media;
mod playback;
mod prerender;
mod render;
mod terminal;

pub use color::ansi::{RESET, average_color, bg, compress, fg, strip_ansi};
pub use foundation::core::{Fps, Rgb, TermSize};
pub use foundation::error::{GlyphcastError, GlyphcastResult};
pub use media::source::{
    AudioMixer, DirectorySource, FrameSource, MediaStream, NullMixer, TranscodeOptions,
    resolve_fps, scan_frame_dir,
};
pub use playback::clock::{Clock, PlaybackClock, SystemClock};
pub use playback::diff::{DiffEngine, DiffMode};
pub use playback::scheduler::{
    PlaybackOptions, PlaybackScheduler, PlaybackState, PlaybackStats, TickAction, tick_action,
};
pub use prerender::pool::{PreRenderCache, PreRenderReport, pre_render_frames};
pub use render::braille::BrailleRenderer;
pub use render::halfblock::HalfBlockRenderer;
pub use render::registry::{RendererCtor, RendererManager, StyleRegistry, TEXT_RAMPS};
pub use render::renderer::{GlyphRenderer, RenderOptions};
pub use render::text::TextRenderer;
pub use render::threshold::otsu_threshold;
pub use terminal::control::{
    CLEAR_SCREEN, CURSOR_HIDE, CURSOR_HOME, CURSOR_SHOW, CrosstermProbe, FixedProbe,
    TerminalProbe, cursor_to,
};
