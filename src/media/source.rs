//! Frame and audio provisioning ahead of playback.
//!
//! A [`FrameSource`] turns some input (a directory of extracted frames, a
//! transcoding pipeline, a generator) into a [`MediaStream`]: an ordered PNG
//! frame list plus optional soundtrack and detected frame rate. Audio output
//! sits behind [`AudioMixer`] so playback code never links a sound backend.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::Fps;
use crate::foundation::error::{GlyphcastError, GlyphcastResult};

/// Everything playback needs from a prepared input.
#[derive(Clone, Debug, Default)]
pub struct MediaStream {
    /// Frame image paths in display order.
    pub frames: Vec<PathBuf>,
    /// Extracted soundtrack, if the input had one.
    pub audio: Option<PathBuf>,
    /// Frame rate detected from the input, if any.
    pub fps: Option<Fps>,
}

/// Produces a [`MediaStream`] and releases whatever it allocated afterwards.
pub trait FrameSource {
    fn open(&mut self) -> GlyphcastResult<MediaStream>;

    /// Releases temporary resources. Failures here are the implementation's
    /// to log; they never abort a finished run.
    fn cleanup(&mut self) {}
}

/// Pre-processing applied while frames are extracted.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TranscodeOptions {
    /// Convert frames to grayscale at extraction time.
    pub grayscale: bool,
    /// Quantize colors toward fewer distinct values so runs of equal escape
    /// codes compress better.
    pub color_smoothing: bool,
}

/// Soundtrack control seam for the playback loop.
pub trait AudioMixer {
    /// Starts the given track. A failure here aborts playback before the
    /// first frame.
    fn play(&mut self, audio: &Path) -> GlyphcastResult<()>;

    /// True while the track is still audible; playback drains on this after
    /// the last frame.
    fn is_busy(&self) -> bool;

    /// Stops output. Must be safe to call when nothing is playing.
    fn stop(&mut self);
}

/// Mixer for silent runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullMixer;

impl AudioMixer for NullMixer {
    fn play(&mut self, _audio: &Path) -> GlyphcastResult<()> {
        Ok(())
    }

    fn is_busy(&self) -> bool {
        false
    }

    fn stop(&mut self) {}
}

/// Source over a directory of already-extracted frames.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    pub frames_dir: PathBuf,
    pub audio: Option<PathBuf>,
    pub fps: Option<Fps>,
}

impl DirectorySource {
    pub fn new(frames_dir: impl Into<PathBuf>) -> Self {
        Self {
            frames_dir: frames_dir.into(),
            audio: None,
            fps: None,
        }
    }

    pub fn with_audio(mut self, audio: impl Into<PathBuf>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    pub fn with_fps(mut self, fps: Fps) -> Self {
        self.fps = Some(fps);
        self
    }
}

impl FrameSource for DirectorySource {
    fn open(&mut self) -> GlyphcastResult<MediaStream> {
        let frames = scan_frame_dir(&self.frames_dir)?;
        if frames.is_empty() {
            return Err(GlyphcastError::config(format!(
                "no .png frames found in '{}'",
                self.frames_dir.display()
            )));
        }
        tracing::debug!(
            frames = frames.len(),
            dir = %self.frames_dir.display(),
            "frame directory scanned"
        );
        Ok(MediaStream {
            frames,
            audio: self.audio.clone(),
            fps: self.fps,
        })
    }
}

/// Lists the `.png` files in `dir`, sorted by path so zero-padded frame
/// numbering yields display order.
pub fn scan_frame_dir(dir: &Path) -> GlyphcastResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        GlyphcastError::config(format!("cannot read frame directory '{}': {e}", dir.display()))
    })?;
    let mut frames = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
        {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

/// Picks the effective frame rate: detected wins, then the caller's fallback.
pub fn resolve_fps(detected: Option<Fps>, fallback: Option<Fps>) -> GlyphcastResult<Fps> {
    detected
        .or(fallback)
        .ok_or_else(|| GlyphcastError::config("no frame rate detected and no fallback provided"))
}

#[cfg(test)]
#[path = "../../tests/unit/media/source.rs"]
mod tests;
