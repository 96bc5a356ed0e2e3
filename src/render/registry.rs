//! Style registry and the manager wrapping one constructed renderer.
//!
//! The registry is an explicit, process-scoped object passed by reference to
//! whatever constructs renderers. There is no ambient global table: new glyph
//! algorithms plug in through [`StyleRegistry::register`] without touching
//! the scheduler.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::foundation::core::TermSize;
use crate::foundation::error::{GlyphcastError, GlyphcastResult};
use crate::prerender::pool::{self, PreRenderReport};
use crate::render::braille::BrailleRenderer;
use crate::render::halfblock::HalfBlockRenderer;
use crate::render::renderer::{GlyphRenderer, RenderOptions};
use crate::render::text::TextRenderer;
use crate::terminal::control;

/// Constructor signature stored in the registry. The style name is passed
/// through so one constructor can back several ramp variants.
pub type RendererCtor = fn(style: &str, options: RenderOptions) -> GlyphcastResult<Box<dyn GlyphRenderer>>;

/// Built-in glyph ramps, darkest to brightest.
pub const TEXT_RAMPS: &[(&str, &str)] = &[
    (
        "default",
        ".-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@",
    ),
    ("legacy", ".:-=+*#%@"),
    ("blockNoColor", " ▒▓█"),
    ("block", "▒▓█"),
    ("blockv2", "█████████"),
];

fn text_ctor(style: &str, options: RenderOptions) -> GlyphcastResult<Box<dyn GlyphRenderer>> {
    let ramp = TEXT_RAMPS
        .iter()
        .find(|(name, _)| *name == style)
        .map(|(_, ramp)| *ramp)
        .ok_or_else(|| GlyphcastError::UnknownStyle(style.to_string()))?;
    Ok(Box::new(TextRenderer::new(ramp, options)?))
}

fn braille_ctor(_style: &str, options: RenderOptions) -> GlyphcastResult<Box<dyn GlyphRenderer>> {
    Ok(Box::new(BrailleRenderer::new(options)))
}

fn halfblock_ctor(_style: &str, options: RenderOptions) -> GlyphcastResult<Box<dyn GlyphRenderer>> {
    Ok(Box::new(HalfBlockRenderer::new(options)))
}

/// Maps style names to renderer constructors.
pub struct StyleRegistry {
    ctors: HashMap<String, RendererCtor>,
}

impl StyleRegistry {
    /// A registry with no styles at all; useful for embedding custom sets.
    pub fn empty() -> Self {
        Self {
            ctors: HashMap::new(),
        }
    }

    /// The built-in styles: every text ramp plus `braille` and `halfblock`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        let ramp_names: Vec<&str> = TEXT_RAMPS.iter().map(|(name, _)| *name).collect();
        registry.register(&ramp_names, text_ctor);
        registry.register(&["braille"], braille_ctor);
        registry.register(&["halfblock"], halfblock_ctor);
        registry
    }

    /// Registers `ctor` under each name, replacing any existing entry.
    pub fn register(&mut self, names: &[&str], ctor: RendererCtor) {
        for name in names {
            self.ctors.insert((*name).to_string(), ctor);
        }
    }

    /// Removes a style; absent names are ignored.
    pub fn unregister(&mut self, name: &str) {
        self.ctors.remove(name);
    }

    pub fn contains(&self, style: &str) -> bool {
        self.ctors.contains_key(style)
    }

    /// All registered style names, sorted for stable presentation.
    pub fn styles(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ctors.keys().cloned().collect();
        names.sort();
        names
    }

    /// Instantiates the renderer registered under `style`.
    pub fn create(
        &self,
        style: &str,
        options: RenderOptions,
    ) -> GlyphcastResult<Box<dyn GlyphRenderer>> {
        let ctor = self
            .ctors
            .get(style)
            .ok_or_else(|| GlyphcastError::UnknownStyle(style.to_string()))?;
        ctor(style, options)
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// High-level rendering front end: owns one constructed renderer and handles
/// frame decoding, pre-render delegation, and cursor visibility.
pub struct RendererManager {
    renderer: Box<dyn GlyphRenderer>,
}

impl RendererManager {
    pub fn new(
        registry: &StyleRegistry,
        style: &str,
        options: RenderOptions,
    ) -> GlyphcastResult<Self> {
        Ok(Self {
            renderer: registry.create(style, options)?,
        })
    }

    pub fn renderer(&self) -> &dyn GlyphRenderer {
        self.renderer.as_ref()
    }

    /// Renders an already-decoded image.
    pub fn render_image(&self, img: &DynamicImage, size: TermSize) -> String {
        self.renderer.render(img, size)
    }

    /// Decodes and renders one frame file.
    pub fn convert_frame(&self, path: &Path, size: TermSize) -> GlyphcastResult<String> {
        let img =
            image::open(path).map_err(|e| GlyphcastError::frame_render(path.to_path_buf(), e))?;
        Ok(self.renderer.render(&img, size))
    }

    /// Renders `paths` ahead of playback on a bounded worker pool.
    pub fn pre_render_frames(
        &self,
        paths: &[PathBuf],
        size: TermSize,
        threads: usize,
    ) -> GlyphcastResult<PreRenderReport> {
        pool::pre_render_frames(self.renderer.as_ref(), paths, size, threads)
    }

    pub fn hide_cursor<W: Write>(&self, out: &mut W) -> GlyphcastResult<()> {
        out.write_all(control::CURSOR_HIDE.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    pub fn show_cursor<W: Write>(&self, out: &mut W) -> GlyphcastResult<()> {
        out.write_all(control::CURSOR_SHOW.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/registry.rs"]
mod tests;
