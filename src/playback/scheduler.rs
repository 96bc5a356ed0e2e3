//! Real-time frame pacing against ideal timestamps.
//!
//! One thread owns the terminal. Each tick compares wall-clock time to the
//! current frame's ideal timestamp and either sleeps, skips, or renders.
//! Skipping advances the ideal timestamp without drawing, so a slow stretch
//! costs frames rather than accumulating delay.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Fps, TermSize};
use crate::foundation::error::{GlyphcastError, GlyphcastResult};
use crate::media::source::AudioMixer;
use crate::playback::clock::{Clock, PlaybackClock};
use crate::playback::diff::{DiffEngine, DiffMode};
use crate::prerender::pool::PreRenderCache;
use crate::render::registry::RendererManager;
use crate::terminal::control::{
    CLEAR_SCREEN, CURSOR_HIDE, CURSOR_SHOW, TerminalProbe, cursor_to,
};

/// Lifecycle of one playback run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Running,
    /// All frames consumed and audio drained.
    Finished,
    /// Stopped early by the interrupt flag. Not an error.
    Interrupted,
}

/// Tuning knobs for a playback run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlaybackOptions {
    pub fps: Fps,
    /// Drift in seconds beyond which a frame is dropped instead of drawn.
    pub skip_threshold: f64,
    /// When false, late frames are still drawn and playback slows down.
    pub frame_skip: bool,
    pub diff_mode: DiffMode,
    /// Overlay a status line on the last terminal row.
    pub debug: bool,
    /// When true, a frame that fails to decode or render is logged and
    /// dropped; otherwise it aborts playback.
    pub skip_failed_frames: bool,
}

impl PlaybackOptions {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            skip_threshold: 0.012,
            frame_skip: true,
            diff_mode: DiffMode::default(),
            debug: false,
            skip_failed_frames: false,
        }
    }
}

/// What one tick decided to do with the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickAction {
    /// Ahead of schedule: sleep this long and re-evaluate.
    Wait(Duration),
    /// Too far behind: drop the frame without drawing.
    Skip,
    /// On time (or skipping disabled): draw the frame.
    Render,
}

/// Pure scheduling decision for one frame given current drift in seconds.
///
/// Negative drift means early. Drift within `[0, skip_threshold]` renders;
/// beyond it the frame is skipped unless `frame_skip` is off.
pub fn tick_action(drift_secs: f64, skip_threshold: f64, frame_skip: bool) -> TickAction {
    if drift_secs < 0.0 {
        TickAction::Wait(Duration::from_secs_f64(-drift_secs))
    } else if frame_skip && drift_secs > skip_threshold {
        TickAction::Skip
    } else {
        TickAction::Render
    }
}

/// Counters and timings accumulated over one playback run.
#[derive(Clone, Debug, Default)]
pub struct PlaybackStats {
    pub total_frames: usize,
    pub rendered: usize,
    pub skipped: usize,
    pub render_failures: usize,
    /// Wall-clock processing time of each displayed frame.
    pub frame_secs: Vec<f64>,
    /// Ideal timestamp of each displayed frame.
    pub ideal_timestamps: Vec<Duration>,
}

impl PlaybackStats {
    fn new(total_frames: usize) -> Self {
        Self {
            total_frames,
            ..Self::default()
        }
    }

    /// Fraction of frames dropped by the pacer.
    pub fn drop_rate(&self) -> f64 {
        if self.total_frames == 0 {
            return 0.0;
        }
        self.skipped as f64 / self.total_frames as f64
    }

    pub fn avg_frame_secs(&self) -> Option<f64> {
        if self.frame_secs.is_empty() {
            return None;
        }
        Some(self.frame_secs.iter().sum::<f64>() / self.frame_secs.len() as f64)
    }

    pub fn min_frame_secs(&self) -> Option<f64> {
        self.frame_secs.iter().copied().reduce(f64::min)
    }

    pub fn max_frame_secs(&self) -> Option<f64> {
        self.frame_secs.iter().copied().reduce(f64::max)
    }
}

/// Plays a frame sequence against a clock, a size probe and an output sink.
///
/// All three collaborators are injected so runs are reproducible under test
/// doubles; production wiring uses [`SystemClock`](crate::SystemClock),
/// [`CrosstermProbe`](crate::CrosstermProbe) and stdout.
pub struct PlaybackScheduler<'a, C: Clock, P: TerminalProbe, W: Write> {
    manager: &'a RendererManager,
    frames: &'a [PathBuf],
    options: PlaybackOptions,
    clock: C,
    probe: P,
    out: W,
    cache: PreRenderCache,
    diff: DiffEngine,
    state: PlaybackState,
    interrupt: Arc<AtomicBool>,
}

impl<'a, C: Clock, P: TerminalProbe, W: Write> PlaybackScheduler<'a, C, P, W> {
    pub fn new(
        manager: &'a RendererManager,
        frames: &'a [PathBuf],
        options: PlaybackOptions,
        clock: C,
        probe: P,
        out: W,
    ) -> Self {
        Self {
            manager,
            frames,
            options,
            clock,
            probe,
            out,
            cache: PreRenderCache::empty(),
            diff: DiffEngine::new(options.diff_mode),
            state: PlaybackState::Idle,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seeds the run with pre-rendered frames; cache misses fall back to
    /// on-demand rendering.
    pub fn with_cache(mut self, cache: PreRenderCache) -> Self {
        self.cache = cache;
        self
    }

    /// Shared flag that stops playback cleanly when set. Hand this to a
    /// signal handler; the loop checks it every tick.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Consumes the scheduler and returns the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs playback to completion, interrupt, or error.
    ///
    /// Audio start failure is fatal; once the loop is running, the mixer is
    /// stopped and the cursor restored no matter how the run ends.
    #[tracing::instrument(skip_all, fields(frames = self.frames.len()))]
    pub fn play(
        &mut self,
        mixer: &mut dyn AudioMixer,
        audio: Option<&Path>,
    ) -> GlyphcastResult<PlaybackStats> {
        let result = self.run(mixer, audio);
        mixer.stop();
        if self.state == PlaybackState::Interrupted {
            let _ = self.out.write_all(CLEAR_SCREEN.as_bytes());
        }
        if let Err(e) = self
            .out
            .write_all(CURSOR_SHOW.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::warn!(error = %e, "cursor restore failed during cleanup");
        }
        result
    }

    fn run(
        &mut self,
        mixer: &mut dyn AudioMixer,
        audio: Option<&Path>,
    ) -> GlyphcastResult<PlaybackStats> {
        self.state = PlaybackState::Running;
        self.diff.reset();
        self.out.write_all(CURSOR_HIDE.as_bytes())?;
        self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        self.out.flush()?;

        if let Some(path) = audio {
            mixer.play(path)?;
        }

        let mut stats = PlaybackStats::new(self.frames.len());
        let start = self.clock.now();
        let mut pacer = PlaybackClock::new(self.options.fps, start);
        let mut current = 0usize;

        while current < self.frames.len() {
            if self.interrupted() {
                self.state = PlaybackState::Interrupted;
                tracing::info!(frame = current, "playback interrupted");
                return Ok(stats);
            }

            let tick_start = self.clock.now();
            let drift = pacer.drift(tick_start);
            match tick_action(drift, self.options.skip_threshold, self.options.frame_skip) {
                TickAction::Wait(d) => {
                    self.clock.sleep(d);
                    continue;
                }
                TickAction::Skip => {
                    tracing::trace!(frame = current, drift, "frame skipped");
                    stats.skipped += 1;
                    pacer.advance();
                    current += 1;
                    continue;
                }
                TickAction::Render => {}
            }

            let size = self.probe.size()?;
            let frames = self.frames;
            let path = &frames[current];
            let rendered = match self.cache.take(path) {
                Some(hit) => hit,
                None => {
                    if !path.exists() {
                        return Err(GlyphcastError::FrameMissing {
                            index: current,
                            path: path.clone(),
                        });
                    }
                    match self.manager.convert_frame(path, size) {
                        Ok(text) => text,
                        Err(e) if self.options.skip_failed_frames => {
                            tracing::warn!(frame = current, error = %e, "dropping unrenderable frame");
                            stats.render_failures += 1;
                            pacer.advance();
                            current += 1;
                            continue;
                        }
                        Err(e) => return Err(e),
                    }
                }
            };

            let bytes = self.diff.patch(&rendered);
            self.out.write_all(bytes.as_bytes())?;
            let done = self.clock.now();
            let proc_secs = done.saturating_sub(tick_start).as_secs_f64();
            if self.options.debug {
                let line = debug_overlay(
                    current,
                    self.frames.len(),
                    proc_secs,
                    drift,
                    stats.skipped,
                    size,
                );
                let _ = self.out.write_all(line.as_bytes());
            }
            self.out.flush()?;

            stats.frame_secs.push(proc_secs);
            stats.ideal_timestamps.push(pacer.ideal_next());
            stats.rendered += 1;
            pacer.advance();
            current += 1;
        }

        // Frames are done; let the soundtrack finish unless interrupted.
        while mixer.is_busy() {
            if self.interrupted() {
                self.state = PlaybackState::Interrupted;
                return Ok(stats);
            }
            self.clock.sleep(Duration::from_millis(100));
        }

        self.state = PlaybackState::Finished;
        tracing::info!(
            rendered = stats.rendered,
            skipped = stats.skipped,
            failures = stats.render_failures,
            drop_rate = stats.drop_rate(),
            avg_frame_ms = stats.avg_frame_secs().map(|s| s * 1000.0),
            min_frame_ms = stats.min_frame_secs().map(|s| s * 1000.0),
            max_frame_ms = stats.max_frame_secs().map(|s| s * 1000.0),
            "playback finished"
        );
        Ok(stats)
    }

    fn interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }
}

/// Status line pinned to the bottom terminal row, truncated to fit.
fn debug_overlay(
    frame: usize,
    total: usize,
    proc_secs: f64,
    drift_secs: f64,
    skipped: usize,
    size: TermSize,
) -> String {
    let mut text = format!(
        "[Frame: {}/{} | Proc: {:.1}ms | Drift: {:+.1}ms | Skipped: {} | Term: {}x{}]",
        frame + 1,
        total,
        proc_secs * 1000.0,
        drift_secs * 1000.0,
        skipped,
        size.cols,
        size.rows,
    );
    text.truncate(size.cols as usize);
    format!("{}{}", cursor_to(size.rows, 1), text)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
