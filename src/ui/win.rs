//! The top-level window: columns, modifier state, input fan-out.

use std::rc::Rc;

use crate::config::Style;
use crate::geom::{Point, Rect};
use crate::render::{Frame, Metrics};
use crate::ui::col::Col;
use crate::ui::Cmd;

struct ColSlot {
    col: Col,
    rect: Rect,
}

pub struct Win {
    cols: Vec<ColSlot>,
    size: Point,
    /// Surface scale factor; widens click tolerance on HiDPI.
    scale: f32,
    style: Rc<Style>,
    metrics: Metrics,
    /// Modifier flags {none, shift, alt, control-or-meta}; edge-triggered.
    mods: [bool; 4],
    /// Last known pointer position; key events route to the column under it.
    pt: Point,
    /// Column with pointer focus, once the pointer has visited one.
    cur: Option<usize>,
    /// Column captured by an open press.
    grab: Option<usize>,
    dirty: bool,
}

impl Win {
    pub fn new(style: Rc<Style>, metrics: Metrics, scale: f32) -> Self {
        let mut win = Self {
            cols: Vec::new(),
            size: Point::ZERO,
            scale,
            style,
            metrics,
            mods: [false; 4],
            pt: Point::ZERO,
            cur: None,
            grab: None,
            dirty: true,
        };
        win.add_col();
        win
    }

    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    pub fn col_bounds(&self) -> Vec<Rect> {
        self.cols.iter().map(|s| s.rect).collect()
    }

    pub fn col(&self, idx: usize) -> &Col {
        &self.cols[idx].col
    }

    pub fn mods(&self) -> [bool; 4] {
        self.mods
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Append a column on the right; widths re-split equally.
    pub fn add_col(&mut self) {
        let col = Col::new(Rc::clone(&self.style), self.metrics, self.scale);
        self.cols.push(ColSlot { col, rect: Rect::default() });
        self.layout(true);
        self.dirty = true;
    }

    /// Remove a column; the last one stays.
    pub fn del_col(&mut self, idx: usize) {
        if self.cols.len() <= 1 || idx >= self.cols.len() {
            return;
        }
        self.cols.remove(idx);
        self.grab = None;
        self.cur = None; // re-established by the next pointer event
        self.layout(false);
        self.dirty = true;
    }

    /// Open a sheet in the rightmost column.
    pub fn add_sheet(&mut self, tag_text: &str, body_text: &str) {
        if let Some(slot) = self.cols.last_mut() {
            slot.col.add_sheet(tag_text, body_text);
        }
        self.dirty = true;
    }

    /// Mirror of the column height distribution, horizontally: previous
    /// shares preserved unless `reset`, remainder absorbed by the last
    /// column, frame gaps between columns.
    fn layout(&mut self, reset: bool) {
        let n = self.cols.len();
        if n == 0 {
            return;
        }
        let avail = (self.size.x - self.style.frame_px * (n as i32 - 1)).max(0);
        let prev: Vec<i32> = self.cols.iter().map(|c| c.rect.w).collect();
        let prev_total: i32 = prev.iter().sum();
        let mut widths = vec![0i32; n];
        for (i, w) in widths.iter_mut().enumerate() {
            *w = if reset || prev_total <= 0 {
                avail / n as i32
            } else {
                (avail as i64 * prev[i] as i64 / prev_total as i64) as i32
            };
        }
        let used: i32 = widths.iter().sum();
        widths[n - 1] = (widths[n - 1] + avail - used).max(0);

        let mut x = 0;
        for (i, w) in widths.into_iter().enumerate() {
            self.cols[i].rect = Rect::new(x, 0, w, self.size.y);
            self.cols[i].col.resize(Point::new(w, self.size.y));
            x += w + self.style.frame_px;
        }
    }

    pub fn resize(&mut self, size: Point) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.layout(false);
        self.dirty = true;
        tracing::debug!(x = size.x, y = size.y, "window resized");
    }

    pub fn draw(&mut self, dirty: bool, frame: &mut Frame) {
        let full = dirty || self.dirty;
        if full {
            let n = self.cols.len();
            for s in self.cols.iter().take(n.saturating_sub(1)) {
                let gap = Rect::new(s.rect.right(), 0, self.style.frame_px, self.size.y);
                frame.fill(gap, self.style.frame);
            }
        }
        for s in &mut self.cols {
            let mut sub = frame.sub(s.rect);
            s.col.draw(full, &mut sub);
        }
        self.dirty = false;
    }

    /// Tick every column and row; true iff any element needs a repaint.
    /// Ticks that change nothing must not trigger one.
    pub fn tick(&mut self) -> bool {
        let mut any = false;
        for s in &mut self.cols {
            any |= s.col.tick();
        }
        any
    }

    pub fn focus(&mut self, focused: bool) {
        if let Some(cur) = self.cur {
            self.cols[cur].col.focus(focused);
        }
    }

    fn col_at(&self, x: i32) -> Option<usize> {
        self.cols.iter().position(|s| x >= s.rect.x && x < s.rect.right())
    }

    /// Move pointer focus to column `i`.
    fn focus_col(&mut self, i: usize) {
        if self.cur == Some(i) {
            return;
        }
        if let Some(old) = self.cur {
            self.cols[old].col.focus(false);
        }
        self.cols[i].col.focus(true);
        self.cur = Some(i);
    }

    pub fn pointer_move(&mut self, pt: Point) -> bool {
        self.pt = pt;
        let target = match self.grab {
            Some(i) => Some(i),
            None => self.col_at(pt.x),
        };
        let Some(i) = target else { return false };
        if self.grab.is_none() {
            self.focus_col(i);
        }
        let local = Point::new(pt.x - self.cols[i].rect.x, pt.y);
        self.cols[i].col.pointer_move(local)
    }

    pub fn click(&mut self, pt: Point, button: i32) -> bool {
        self.pt = pt;
        let press = button > 0;
        let target = if press { self.col_at(pt.x) } else { self.grab };
        let Some(i) = target else { return false };
        if press {
            self.grab = Some(i);
            self.focus_col(i);
        } else {
            self.grab = None;
        }
        let local = Point::new(pt.x - self.cols[i].rect.x, pt.y);
        let out = self.cols[i].col.click(local, button);
        let mut redraw = out.redraw;
        if let Some((cmd, row)) = out.cmd {
            self.run(cmd, i, row);
            redraw = true;
        }
        redraw
    }

    fn run(&mut self, cmd: Cmd, col: usize, row: usize) {
        tracing::info!(?cmd, col, row, "tag command");
        match cmd {
            Cmd::Add => {
                let tag_text = self.style.sheet_tag_text.clone();
                self.cols[col].col.add_sheet(&tag_text, "");
            }
            Cmd::Del => {
                self.cols[col].col.del_sheet(row);
            }
            Cmd::AddCol => self.add_col(),
            Cmd::DelCol => self.del_col(col),
        }
        self.dirty = true;
    }

    pub fn wheel(&mut self, pt: Point, x: i32, y: i32) -> bool {
        let Some(i) = self.col_at(pt.x) else { return false };
        let local = Point::new(pt.x - self.cols[i].rect.x, pt.y);
        self.cols[i].col.wheel(local, x, y)
    }

    pub fn dir(&mut self, x: i32, y: i32) -> bool {
        let Some(cur) = self.cur else { return false };
        self.cols[cur].col.dir(x, y)
    }

    /// Update the global modifier vector first, then forward the edge to
    /// the current row. Exactly one flag changes per call; a repeated press
    /// of a held modifier is not a toggle.
    pub fn modifier(&mut self, m: i32) -> bool {
        let idx = m.unsigned_abs() as usize;
        if idx == 0 || idx >= self.mods.len() {
            return false;
        }
        self.mods[idx] = m > 0;
        let Some(cur) = self.cur else { return false };
        self.cols[cur].col.modifier(m)
    }

    pub fn rune(&mut self, r: char) -> bool {
        let Some(cur) = self.cur else { return false };
        self.cols[cur].col.rune(r)
    }
}
