//! Body rows: multi-line, wrapped, scrollable text editors.

use std::rc::Rc;
use std::time::Instant;

use crate::click::MultiClick;
use crate::config::Style;
use crate::geom::{Point, Rect};
use crate::render::{Frame, Metrics};
use crate::text::{Selection, TextBuffer};
use crate::ui::{Row, BLINK_TICKS, DIR_END, DIR_HOME};

/// One display row of the wrap layout: a slice of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewRow {
    /// Character offset of the first character on this display row.
    start: usize,
    /// Characters on this display row (no terminator).
    len: usize,
}

pub struct Body {
    buf: TextBuffer,
    style: Rc<Style>,
    metrics: Metrics,
    scale: f32,
    size: Point,
    /// Display rows, recomputed when the width or the text changes.
    layout: Vec<ViewRow>,
    wrap_cols: usize,
    /// First visible display row.
    top: usize,
    clicks: MultiClick,
    drag: Option<i32>,
    shift: bool,
    hi: u8,
    focused: bool,
    blink_on: bool,
    ticks: u32,
    dirty: bool,
    /// Damaged display-row span [a, b), coalesced between draws.
    damage: Option<(usize, usize)>,
}

impl Body {
    pub fn new(text: &str, style: Rc<Style>, metrics: Metrics, scale: f32) -> Self {
        let mut body = Self {
            buf: TextBuffer::from_str(text),
            style,
            metrics,
            scale,
            size: Point::ZERO,
            layout: Vec::new(),
            wrap_cols: 1,
            top: 0,
            clicks: MultiClick::default(),
            drag: None,
            shift: false,
            hi: 1,
            focused: false,
            blink_on: false,
            ticks: 0,
            dirty: true,
            damage: None,
        };
        body.relayout();
        body
    }

    pub fn selection(&self) -> Selection {
        self.buf.selection()
    }

    pub fn caret(&self) -> usize {
        self.buf.caret()
    }

    /// First visible display row.
    pub fn scroll_top(&self) -> usize {
        self.top
    }

    fn pad(&self) -> i32 {
        self.style.text_pad_px
    }

    fn cols_for(&self, width: i32) -> usize {
        let usable = (width - 2 * self.pad()) as f32 / self.metrics.advance;
        (usable.floor() as isize).max(1) as usize
    }

    /// Rebuild the display-row layout for the current wrap width.
    fn relayout(&mut self) {
        self.layout.clear();
        let cols = self.wrap_cols;
        for line in 0..self.buf.line_count() {
            let start = self.buf.line_start(line);
            let len = self.buf.line_len(line);
            if len == 0 {
                self.layout.push(ViewRow { start, len: 0 });
                continue;
            }
            let mut seg = 0;
            while seg < len {
                let n = cols.min(len - seg);
                self.layout.push(ViewRow { start: start + seg, len: n });
                seg += n;
            }
        }
    }

    fn view_rows(&self) -> usize {
        (self.size.y / self.metrics.line_height).max(1) as usize
    }

    fn max_top(&self) -> usize {
        self.layout.len().saturating_sub(1)
    }

    /// Display row containing a character offset.
    fn row_of(&self, off: usize) -> usize {
        let i = self.layout.partition_point(|r| r.start <= off);
        i.saturating_sub(1)
    }

    fn offset_at(&self, pt: Point) -> usize {
        if self.layout.is_empty() {
            return 0;
        }
        let lh = self.metrics.line_height.max(1);
        let r = (self.top + (pt.y.max(0) / lh) as usize).min(self.max_top());
        let row = self.layout[r];
        let col = ((pt.x - self.pad()) as f32 / self.metrics.advance).round().max(0.0) as usize;
        row.start + col.min(row.len)
    }

    fn scroll_into_view(&mut self, off: usize) -> bool {
        let r = self.row_of(off);
        let rows = self.view_rows();
        let old = self.top;
        if r < self.top {
            self.top = r;
        } else if r >= self.top + rows {
            self.top = r + 1 - rows;
        }
        old != self.top
    }

    fn damage_rows(&mut self, a: usize, b: usize) {
        self.damage = Some(match self.damage {
            Some((x, y)) => (x.min(a), y.max(b)),
            None => (a, b),
        });
    }

    fn damage_caret_row(&mut self) {
        let r = self.row_of(self.buf.caret());
        self.damage_rows(r, r + 1);
    }

    fn press(&mut self, pt: Point, button: i32) -> [usize; 2] {
        let count = self.clicks.track(button, Instant::now(), pt, self.scale);
        let off = self.offset_at(pt);
        self.hi = count;
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

    /// Paint one visible strip: background, selection span, text, caret.
    fn paint_row(&self, frame: &mut Frame, view_idx: usize) {
        let lh = self.metrics.line_height;
        let y = view_idx as i32 * lh;
        frame.fill(Rect::new(0, y, self.size.x, lh), self.style.body_bg);
        let Some(row) = self.layout.get(self.top + view_idx).copied() else {
            return;
        };
        let sel = self.buf.selection();
        let [s0, s1] = sel.range();
        let (rs, re) = (row.start, row.start + row.len);
        if s0 < s1 && s0 <= re && s1 > rs {
            let from = s0.max(rs) - rs;
            let runs_past = s1 > re;
            let to = s1.min(re) - rs;
            let x0 = self.pad() + (from as f32 * self.metrics.advance).round() as i32;
            let x1 = if runs_past {
                // the newline (or wrap) is part of the selection: highlight
                // out to the right padding edge
                self.size.x - self.pad()
            } else {
                self.pad() + (to as f32 * self.metrics.advance).round() as i32
            };
            frame.fill(Rect::new(x0, y, (x1 - x0).max(0), lh), self.style.highlight(self.hi));
        }
        if row.len > 0 {
            let text = self.buf.slice(row.start..row.start + row.len);
            frame.draw_text(self.pad(), y, &text, self.style.fg);
        }
        if self.focused && self.blink_on && sel.is_empty() {
            let caret = self.buf.caret();
            let r = self.row_of(caret);
            if r == self.top + view_idx {
                let col = caret - self.layout[r].start;
                let x = self.pad() + (col as f32 * self.metrics.advance).round() as i32;
                frame.fill(Rect::new(x, y, self.style.cursor_width_px.max(1), lh), self.style.fg);
            }
        }
    }
}

impl Row for Body {
    fn draw(&mut self, dirty: bool, frame: &mut Frame) {
        let lh = self.metrics.line_height.max(1);
        let visible = ((self.size.y + lh - 1) / lh).max(0) as usize;
        if dirty || self.dirty {
            for v in 0..visible {
                self.paint_row(frame, v);
            }
        } else if let Some((a, b)) = self.damage {
            let lo = a.max(self.top);
            let hi = b.min(self.top + visible);
            for r in lo..hi {
                self.paint_row(frame, r - self.top);
            }
        }
        self.dirty = false;
        self.damage = None;
    }

    fn focus(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        self.blink_on = focused;
        self.ticks = 0;
        self.damage_caret_row();
    }

    fn resize(&mut self, size: Point) {
        if size == self.size {
            return;
        }
        let width_changed = size.x != self.size.x;
        self.size = size;
        if width_changed {
            self.wrap_cols = self.cols_for(size.x);
            self.relayout();
        }
        self.top = self.top.min(self.max_top());
        self.dirty = true;
    }

    fn tick(&mut self) -> bool {
        let pending = self.damage.is_some() || self.dirty;
        if self.focused {
            self.ticks += 1;
            if self.ticks % BLINK_TICKS == 0 {
                self.blink_on = !self.blink_on;
                self.damage_caret_row();
                return true;
            }
        }
        pending
    }

    fn pointer_move(&mut self, pt: Point) -> bool {
        if self.drag.is_none() {
            return false;
        }
        let old_point = self.buf.selection().point;
        if !self.buf.extend_to(self.offset_at(pt)) {
            return false;
        }
        let new_point = self.buf.selection().point;
        let (a, b) = (self.row_of(old_point), self.row_of(new_point));
        self.damage_rows(a.min(b), a.max(b) + 1);
        true
    }

    fn click(&mut self, pt: Point, button: i32) -> ([usize; 2], bool) {
        if button > 0 {
            let old = self.buf.selection().range();
            let range = self.press(pt, button);
            let rows = [old[0], old[1], range[0], range[1]].map(|off| self.row_of(off));
            let lo = rows.iter().copied().min().unwrap_or(0);
            let hi = rows.iter().copied().max().unwrap_or(0);
            self.damage_rows(lo, hi + 1);
            (range, true)
        } else {
            if self.drag == Some(-button) {
                self.drag = None;
            }
            (self.buf.selection().range(), false)
        }
    }

    fn wheel(&mut self, x: i32, y: i32) -> bool {
        let _ = x; // wrapped text has no horizontal overflow
        if y == 0 {
            return false;
        }
        let next = if y < 0 {
            self.top.saturating_sub(y.unsigned_abs() as usize)
        } else {
            (self.top + y as usize).min(self.max_top())
        };
        if next == self.top {
            return false;
        }
        self.top = next;
        self.dirty = true;
        true
    }

    fn dir(&mut self, x: i32, y: i32) -> bool {
        assert!(x == 0 || y == 0, "directional events are axis-aligned");
        let old_point = self.buf.selection().point;
        let changed = if x != 0 {
            if x == DIR_HOME {
                self.buf.to_start()
            } else if x == DIR_END {
                self.buf.to_end()
            } else if x.abs() == 1 {
                self.buf.move_horizontal(x)
            } else {
                false
            }
        } else if y == DIR_HOME {
            self.buf.to_start()
        } else if y == DIR_END {
            self.buf.to_end()
        } else if y.abs() == 1 {
            self.buf.move_vertical(y)
        } else if y.abs() == 2 {
            let page = self.view_rows() as i32;
            self.buf.move_vertical(if y < 0 { -page } else { page })
        } else {
            false
        };
        if !changed {
            return false;
        }
        let a = self.row_of(old_point);
        let b = self.row_of(self.buf.caret());
        if self.scroll_into_view(self.buf.caret()) {
            self.dirty = true;
        } else {
            self.damage_rows(a.min(b), a.max(b) + 1);
        }
        true
    }

    fn modifier(&mut self, m: i32) -> bool {
        if m.abs() == 1 {
            self.shift = m > 0;
        }
        false
    }

    fn rune(&mut self, r: char) -> bool {
        let from = self.row_of(self.buf.selection().start()).saturating_sub(1);
        let changed = match r {
            '\u{8}' => self.buf.backspace(),
            '\u{7f}' => self.buf.delete_forward(),
            _ => {
                self.buf.insert(r);
                true
            }
        };
        if !changed {
            return false;
        }
        self.relayout();
        self.damage_rows(from, usize::MAX);
        if self.scroll_into_view(self.buf.caret()) {
            self.dirty = true;
        }
        true
    }

    fn text(&self) -> String {
        self.buf.text()
    }
}
