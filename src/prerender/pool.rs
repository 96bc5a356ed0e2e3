//! Bounded parallel pre-rendering of a known frame list.
//!
//! Workers only populate the result map; they never touch the terminal.
//! Every task writes a distinct key (frame paths are unique), so the only
//! synchronization needed is the collection itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::foundation::core::TermSize;
use crate::foundation::error::{GlyphcastError, GlyphcastResult};
use crate::render::renderer::GlyphRenderer;

/// Rendered frames keyed by frame path.
///
/// Lookups consume: [`PreRenderCache::take`] removes the entry, bounding peak
/// memory to the frames not yet displayed. This is safe only because frame
/// handles are strictly increasing and never requested twice; a repeated
/// handle would miss the cache and fall back to on-demand rendering.
#[derive(Debug, Default)]
pub struct PreRenderCache {
    frames: HashMap<PathBuf, String>,
}

impl PreRenderCache {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stores a rendered frame, replacing any previous entry for `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, rendered: String) {
        self.frames.insert(path.into(), rendered);
    }

    /// Removes and returns the rendered frame for `path`, if present.
    pub fn take(&mut self, path: &Path) -> Option<String> {
        self.frames.remove(path)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Outcome of a pre-render pass: the cache plus per-frame failures, reported
/// after pool drain without having aborted sibling tasks.
#[derive(Debug, Default)]
pub struct PreRenderReport {
    pub cache: PreRenderCache,
    pub failures: Vec<(PathBuf, GlyphcastError)>,
}

/// Renders every path in `paths` at `size` across up to `threads` workers.
///
/// Worker count is clamped to `[1, paths.len()]`. Each frame yields a
/// `(path, result)` pair; failures are collected, never thrown across tasks.
#[tracing::instrument(skip(renderer, paths), fields(frames = paths.len(), threads))]
pub fn pre_render_frames(
    renderer: &dyn GlyphRenderer,
    paths: &[PathBuf],
    size: TermSize,
    threads: usize,
) -> GlyphcastResult<PreRenderReport> {
    if paths.is_empty() {
        return Ok(PreRenderReport::default());
    }

    let workers = threads.clamp(1, paths.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| GlyphcastError::config(format!("pre-render pool setup failed: {e}")))?;

    let results: Vec<(PathBuf, GlyphcastResult<String>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| (path.clone(), render_one(renderer, path, size)))
            .collect()
    });

    let mut report = PreRenderReport::default();
    for (path, result) in results {
        match result {
            Ok(rendered) => {
                report.cache.frames.insert(path, rendered);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "pre-render task failed");
                report.failures.push((path, e));
            }
        }
    }
    tracing::debug!(
        rendered = report.cache.len(),
        failed = report.failures.len(),
        "pre-render pass complete"
    );
    Ok(report)
}

fn render_one(
    renderer: &dyn GlyphRenderer,
    path: &Path,
    size: TermSize,
) -> GlyphcastResult<String> {
    let img =
        image::open(path).map_err(|e| GlyphcastError::frame_render(path.to_path_buf(), e))?;
    Ok(renderer.render(&img, size))
}

#[cfg(test)]
#[path = "../../tests/unit/prerender/pool.rs"]
mod tests;
