//! Pixel painting: frames, glyph sources, and the fontdue rasterizer.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings};

use crate::config::{Color, Style};
use crate::geom::{Point, Rect};

/// Font measurements the layout code needs without touching the rasterizer.
#[derive(Debug, Clone, Copy)]
pub struct Metrics {
    /// Vertical distance between line tops.
    pub line_height: i32,
    /// Baseline offset from the line top.
    pub ascent: f32,
    /// Monospace horizontal advance.
    pub advance: f32,
}

/// One rasterized glyph: alpha coverage plus placement.
#[derive(Debug, Clone)]
pub struct Glyph {
    pub width: usize,
    pub height: usize,
    pub xmin: i32,
    pub ymin: i32,
    pub advance: f32,
    pub coverage: Vec<u8>,
}

/// The rasterization seam. The shell provides a fontdue-backed source;
/// tests substitute fixed block glyphs.
pub trait GlyphSource {
    fn metrics(&self) -> Metrics;
    fn glyph(&mut self, ch: char) -> &Glyph;
}

/// fontdue-backed glyph source with a per-character cache.
pub struct FontGlyphs {
    font: Font,
    px: f32,
    metrics: Metrics,
    cache: HashMap<char, Glyph>,
}

const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

fn font_bytes(configured: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = configured {
        return std::fs::read(path)
            .with_context(|| format!("failed to read font {}", path.display()));
    }
    for candidate in FALLBACK_FONTS {
        if let Ok(bytes) = std::fs::read(candidate) {
            tracing::debug!(font = candidate, "using fallback font");
            return Ok(bytes);
        }
    }
    Err(anyhow!("no usable monospace font found; set font_path in the style file"))
}

impl FontGlyphs {
    /// Load the configured font scaled for the surface DPI.
    pub fn new(style: &Style, scale: f32) -> Result<Self> {
        let bytes = font_bytes(style.font_path.as_deref())?;
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow!("failed to parse font: {e}"))?;
        let px = style.font_size * scale;
        let line = font
            .horizontal_line_metrics(px)
            .ok_or_else(|| anyhow!("font is missing horizontal line metrics"))?;
        let (m, _) = font.rasterize('M', px);
        let metrics = Metrics {
            line_height: line.new_line_size.ceil() as i32,
            ascent: line.ascent,
            advance: m.advance_width,
        };
        Ok(Self { font, px, metrics, cache: HashMap::new() })
    }
}

impl GlyphSource for FontGlyphs {
    fn metrics(&self) -> Metrics {
        self.metrics
    }

    fn glyph(&mut self, ch: char) -> &Glyph {
        let Self { font, px, cache, .. } = self;
        cache.entry(ch).or_insert_with(|| {
            let (m, coverage) = font.rasterize(ch, *px);
            Glyph {
                width: m.width,
                height: m.height,
                xmin: m.xmin,
                ymin: m.ymin,
                advance: m.advance_width,
                coverage,
            }
        })
    }
}

fn blend(bg: u32, fg: Color, alpha: u8) -> u32 {
    let a = alpha as u32;
    let inv = 255 - a;
    let r = (((bg >> 16) & 0xFF) * inv + fg.r as u32 * a) / 255;
    let g = (((bg >> 8) & 0xFF) * inv + fg.g as u32 * a) / 255;
    let b = ((bg & 0xFF) * inv + fg.b as u32 * a) / 255;
    0xFF00_0000 | (r << 16) | (g << 8) | b
}

/// A paint target: an ARGB pixel buffer viewed through a local origin and
/// clip rectangle. [`Frame::sub`] hands an element a frame whose (0,0) is
/// the element's own top-left, so rows never see window coordinates.
pub struct Frame<'a> {
    buf: &'a mut [u32],
    stride: usize,
    /// Buffer coordinates of the local origin.
    origin: Point,
    /// Clip, in buffer coordinates.
    clip: Rect,
    pub glyphs: &'a mut dyn GlyphSource,
}

impl<'a> Frame<'a> {
    pub fn new(buf: &'a mut [u32], size: Point, glyphs: &'a mut dyn GlyphSource) -> Frame<'a> {
        debug_assert!(buf.len() >= (size.x.max(0) as usize) * (size.y.max(0) as usize));
        Frame {
            buf,
            stride: size.x.max(0) as usize,
            origin: Point::ZERO,
            clip: Rect::from_size(size),
            glyphs,
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.glyphs.metrics()
    }

    /// A sub-frame for `r` (local coordinates): translated origin,
    /// tightened clip.
    pub fn sub(&mut self, r: Rect) -> Frame<'_> {
        let abs = r.translate(self.origin);
        Frame {
            buf: &mut *self.buf,
            stride: self.stride,
            origin: abs.origin(),
            clip: self.clip.intersect(abs),
            glyphs: &mut *self.glyphs,
        }
    }

    pub fn fill(&mut self, r: Rect, color: Color) {
        let abs = self.clip.intersect(r.translate(self.origin));
        if abs.is_empty() {
            return;
        }
        let argb = color.to_argb_u32();
        for y in abs.y..abs.bottom() {
            let row = y as usize * self.stride;
            self.buf[row + abs.x as usize..row + abs.right() as usize].fill(argb);
        }
    }

    /// Draw `text` with its line top at (x, y), alpha-blending glyph
    /// coverage over whatever is already in the buffer.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        let ascent = self.glyphs.metrics().ascent;
        let baseline = y as f32 + ascent;
        let mut pen = x as f32;
        for ch in text.chars() {
            let Frame { buf, stride, origin, clip, glyphs } = self;
            let g = glyphs.glyph(ch);
            let left = (pen + g.xmin as f32).round() as i32;
            let top = (baseline - g.height as f32 - g.ymin as f32).round() as i32;
            for gy in 0..g.height {
                let py = origin.y + top + gy as i32;
                for gx in 0..g.width {
                    let alpha = g.coverage[gy * g.width + gx];
                    if alpha == 0 {
                        continue;
                    }
                    let px = origin.x + left + gx as i32;
                    if !clip.contains(Point::new(px, py)) {
                        continue;
                    }
                    let idx = py as usize * *stride + px as usize;
                    buf[idx] = blend(buf[idx], color, alpha);
                }
            }
            pen += g.advance;
        }
    }
}
