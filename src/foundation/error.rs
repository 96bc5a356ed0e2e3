use std::path::PathBuf;

/// Convenience result type used across Glyphcast.
pub type GlyphcastResult<T> = Result<T, GlyphcastError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Interrupts are deliberately not represented here: an external interrupt is
/// a clean exit, surfaced as [`crate::PlaybackState::Interrupted`] alongside an
/// `Ok` result. Cleanup failures are logged and never propagated.
#[derive(thiserror::Error, Debug)]
pub enum GlyphcastError {
    /// A render style name that is not present in the registry.
    #[error("unknown render style '{0}'")]
    UnknownStyle(String),

    /// Invalid caller-provided configuration (bad fps, empty frame list, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// An expected frame file was absent at playback time. Fatal.
    #[error("frame {index} missing: {}", path.display())]
    FrameMissing {
        /// 0-based index of the missing frame.
        index: usize,
        /// Path the frame was expected at.
        path: PathBuf,
    },

    /// A single frame failed to decode or convert. Recoverable: the pre-render
    /// pool aggregates these, and the scheduler may opt into skip-and-continue.
    #[error("failed to render frame '{}': {detail}", path.display())]
    FrameRender {
        /// Path of the offending frame.
        path: PathBuf,
        /// Human-readable failure detail.
        detail: String,
    },

    /// Audio collaborator failure. Fatal at startup, ignorable at shutdown.
    #[error("audio playback error: {0}")]
    Audio(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphcastError {
    /// Build a [`GlyphcastError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GlyphcastError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`GlyphcastError::FrameRender`] value from any displayable cause.
    pub fn frame_render(path: impl Into<PathBuf>, detail: impl std::fmt::Display) -> Self {
        Self::FrameRender {
            path: path.into(),
            detail: detail.to_string(),
        }
    }
}

impl From<std::io::Error> for GlyphcastError {
    fn from(e: std::io::Error) -> Self {
        Self::Other(e.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
