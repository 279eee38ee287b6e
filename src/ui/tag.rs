//! Tag rows: the one-line command/label strip above a column or sheet.

use std::rc::Rc;
use std::time::Instant;

use crate::click::MultiClick;
use crate::config::Style;
use crate::geom::{Point, Rect};
use crate::render::{Frame, Metrics};
use crate::text::{Selection, TextBuffer};
use crate::ui::{Row, BLINK_TICKS, DIR_END, DIR_HOME};

/// Vertical padding inside the strip, split above and below the text.
const PAD_Y: i32 = 2;

pub struct Tag {
    buf: TextBuffer,
    style: Rc<Style>,
    metrics: Metrics,
    scale: f32,
    size: Point,
    /// First visible column when the text overflows horizontally.
    scroll_cols: usize,
    clicks: MultiClick,
    /// Button held for an active drag selection.
    drag: Option<i32>,
    shift: bool,
    /// Highlight class (1..=3) of the last press.
    hi: u8,
    focused: bool,
    blink_on: bool,
    ticks: u32,
    dirty: bool,
    damaged: bool,
}

impl Tag {
    pub fn new(text: &str, style: Rc<Style>, metrics: Metrics, scale: f32) -> Self {
        Self {
            buf: TextBuffer::from_str(text),
            style,
            metrics,
            scale,
            size: Point::ZERO,
            scroll_cols: 0,
            clicks: MultiClick::default(),
            drag: None,
            shift: false,
            hi: 1,
            focused: false,
            blink_on: false,
            ticks: 0,
            dirty: true,
            damaged: false,
        }
    }

    /// Fixed strip height for a metrics set.
    pub fn height(metrics: &Metrics) -> i32 {
        metrics.line_height + 2 * PAD_Y
    }

    pub fn selection(&self) -> Selection {
        self.buf.selection()
    }

    pub fn caret(&self) -> usize {
        self.buf.caret()
    }

    fn pad(&self) -> i32 {
        self.style.text_pad_px
    }

    fn offset_at(&self, pt: Point) -> usize {
        let col = ((pt.x - self.pad()) as f32 / self.metrics.advance).round().max(0.0) as usize;
        (col + self.scroll_cols).min(self.buf.len())
    }

    fn caret_x(&self, off: usize) -> i32 {
        let col = off.saturating_sub(self.scroll_cols);
        self.pad() + (col as f32 * self.metrics.advance).round() as i32
    }

    fn press(&mut self, pt: Point, button: i32) -> [usize; 2] {
        let count = self.clicks.track(button, Instant::now(), pt, self.scale);
        let off = self.offset_at(pt);
        self.hi = count;
        if button == 2 {
            // command word resolution is the owner's job; the selection
            // is left untouched
            return self.buf.word_at(off);
        }
        match count {
            2 => {
                let [a, b] = self.buf.word_at(off);
                self.buf.select(a, b);
            }
            3 => {
                let [a, b] = self.buf.line_at(off);
                self.buf.select(a, b);
            }
            _ if self.shift => {
                self.buf.extend_to(off);
            }
            _ => {
                self.buf.set_caret(off);
            }
        }
        self.drag = Some(button);
        self.buf.selection().range()
    }
}

impl Row for Tag {
    fn draw(&mut self, dirty: bool, frame: &mut Frame) {
        if !(dirty || self.dirty || self.damaged) {
            return;
        }
        frame.fill(Rect::from_size(self.size), self.style.tag_bg);
        let sel = self.buf.selection();
        if !sel.is_empty() {
            let x0 = self.caret_x(sel.start());
            let x1 = self.caret_x(sel.end());
            let strip = Rect::new(x0, PAD_Y, (x1 - x0).max(0), self.metrics.line_height);
            frame.fill(strip, self.style.highlight(self.hi));
        }
        let text: String = self.buf.text().chars().skip(self.scroll_cols).collect();
        frame.draw_text(self.pad(), PAD_Y, &text, self.style.fg);
        if self.focused && self.blink_on && sel.is_empty() {
            let bar = Rect::new(
                self.caret_x(self.buf.caret()),
                PAD_Y,
                self.style.cursor_width_px.max(1),
                self.metrics.line_height,
            );
            frame.fill(bar, self.style.fg);
        }
        self.dirty = false;
        self.damaged = false;
    }

    fn focus(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        self.blink_on = focused;
        self.ticks = 0;
        self.damaged = true;
    }

    fn resize(&mut self, size: Point) {
        if size != self.size {
            self.size = size;
            self.dirty = true;
        }
    }

    fn tick(&mut self) -> bool {
        let pending = self.damaged || self.dirty;
        if self.focused {
            self.ticks += 1;
            if self.ticks % BLINK_TICKS == 0 {
                self.blink_on = !self.blink_on;
                self.damaged = true;
                return true;
            }
        }
        pending
    }

    fn pointer_move(&mut self, pt: Point) -> bool {
        if self.drag.is_none() {
            return false;
        }
        let off = self.offset_at(pt);
        if self.buf.extend_to(off) {
            self.damaged = true;
            true
        } else {
            false
        }
    }

    fn click(&mut self, pt: Point, button: i32) -> ([usize; 2], bool) {
        if button > 0 {
            let range = self.press(pt, button);
            self.damaged = true;
            (range, true)
        } else {
            if self.drag == Some(-button) {
                self.drag = None;
            }
            (self.buf.selection().range(), false)
        }
    }

    fn wheel(&mut self, x: i32, y: i32) -> bool {
        let _ = y; // a single line has nowhere to scroll vertically
        if x == 0 {
            return false;
        }
        let next = if x < 0 {
            self.scroll_cols.saturating_sub(x.unsigned_abs() as usize)
        } else {
            (self.scroll_cols + x as usize).min(self.buf.len())
        };
        if next == self.scroll_cols {
            return false;
        }
        self.scroll_cols = next;
        self.dirty = true;
        true
    }

    fn dir(&mut self, x: i32, y: i32) -> bool {
        assert!(x == 0 || y == 0, "directional events are axis-aligned");
        let code = if x != 0 { x } else { y };
        let changed = if code == DIR_HOME {
            self.buf.to_start()
        } else if code == DIR_END {
            self.buf.to_end()
        } else if x.abs() == 1 {
            self.buf.move_horizontal(x)
        } else {
            // vertical motion has nowhere to go in one line
            false
        };
        if changed {
            self.damaged = true;
        }
        changed
    }

    fn modifier(&mut self, m: i32) -> bool {
        if m.abs() == 1 {
            self.shift = m > 0;
        }
        false
    }

    fn rune(&mut self, r: char) -> bool {
        let changed = match r {
            '\u{8}' => self.buf.backspace(),
            '\u{7f}' => self.buf.delete_forward(),
            '\n' => false, // tags are single-line
            _ => {
                self.buf.insert(r);
                true
            }
        };
        if changed {
            self.damaged = true;
        }
        changed
    }

    fn text(&self) -> String {
        self.buf.text()
    }
}
