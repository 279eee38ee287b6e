//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use muntin::config::Style;
use muntin::geom::Point;
use muntin::render::{Frame, Glyph, GlyphSource, Metrics};

pub const CELL_W: i32 = 8;
pub const CELL_H: i32 = 16;

/// Fixed-size block glyphs: every character rasterizes to the same opaque
/// cell, so tests can drive painting without a real font.
pub struct BlockGlyphs {
    metrics: Metrics,
    glyph: Glyph,
}

impl Default for BlockGlyphs {
    fn default() -> Self {
        Self {
            metrics: Metrics { line_height: CELL_H, ascent: 12.0, advance: CELL_W as f32 },
            glyph: Glyph {
                width: CELL_W as usize,
                height: 12,
                xmin: 0,
                ymin: 0,
                advance: CELL_W as f32,
                coverage: vec![255; CELL_W as usize * 12],
            },
        }
    }
}

impl GlyphSource for BlockGlyphs {
    fn metrics(&self) -> Metrics {
        self.metrics
    }

    fn glyph(&mut self, _ch: char) -> &Glyph {
        &self.glyph
    }
}

pub fn metrics() -> Metrics {
    BlockGlyphs::default().metrics
}

pub fn style() -> Rc<Style> {
    Rc::new(Style::load(None).expect("embedded style parses"))
}

/// Render into a fresh pixel buffer through a closure.
pub fn render(size: Point, draw: impl FnOnce(&mut Frame)) -> Vec<u32> {
    let mut buf = vec![0u32; (size.x * size.y) as usize];
    render_into(&mut buf, size, draw);
    buf
}

/// Render into an existing buffer (for incremental-draw tests).
pub fn render_into(buf: &mut [u32], size: Point, draw: impl FnOnce(&mut Frame)) {
    let mut glyphs = BlockGlyphs::default();
    let mut frame = Frame::new(buf, size, &mut glyphs);
    draw(&mut frame);
}
