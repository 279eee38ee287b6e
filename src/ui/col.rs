//! Columns: vertical stacks of rows with hit-test routing.

use std::rc::Rc;

use crate::config::Style;
use crate::geom::{Point, Rect};
use crate::render::{Frame, Metrics};
use crate::ui::{Body, Cmd, Row, Tag};

/// Outcome of a click routed through a column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickOutcome {
    pub redraw: bool,
    /// Command resolved from a tag word on middle press, with the row
    /// index it was clicked in.
    pub cmd: Option<(Cmd, usize)>,
}

struct Slot {
    row: Box<dyn Row>,
    rect: Rect,
    is_tag: bool,
}

pub struct Col {
    slots: Vec<Slot>,
    size: Point,
    style: Rc<Style>,
    metrics: Metrics,
    scale: f32,
    dirty: bool,
    /// Row with pointer focus, once the pointer has visited one.
    cur: Option<usize>,
    /// Row captured by an open press; drag and release route here.
    grab: Option<usize>,
}

impl Col {
    pub fn new(style: Rc<Style>, metrics: Metrics, scale: f32) -> Self {
        let tag = Tag::new(&style.column_tag_text, Rc::clone(&style), metrics, scale);
        Self {
            slots: vec![Slot { row: Box::new(tag), rect: Rect::default(), is_tag: true }],
            size: Point::ZERO,
            style,
            metrics,
            scale,
            dirty: true,
            cur: None,
            grab: None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.slots.len()
    }

    pub fn row_bounds(&self) -> Vec<Rect> {
        self.slots.iter().map(|s| s.rect).collect()
    }

    pub fn row_text(&self, idx: usize) -> String {
        self.slots[idx].row.text()
    }

    pub fn size(&self) -> Point {
        self.size
    }

    /// Append a tag/body sheet.
    pub fn add_sheet(&mut self, tag_text: &str, body_text: &str) {
        let tag = Tag::new(tag_text, Rc::clone(&self.style), self.metrics, self.scale);
        let body = Body::new(body_text, Rc::clone(&self.style), self.metrics, self.scale);
        self.slots.push(Slot { row: Box::new(tag), rect: Rect::default(), is_tag: true });
        self.slots.push(Slot { row: Box::new(body), rect: Rect::default(), is_tag: false });
        self.layout(true);
        self.dirty = true;
    }

    /// Remove the sheet whose tag or body sits at `idx`. Row 0, the
    /// column's own tag, stays.
    pub fn del_sheet(&mut self, idx: usize) -> bool {
        if idx == 0 || idx >= self.slots.len() {
            return false;
        }
        let tag_idx = if self.slots[idx].is_tag { idx } else { idx - 1 };
        if tag_idx == 0 {
            return false;
        }
        let end = (tag_idx + 2).min(self.slots.len());
        self.slots.drain(tag_idx..end);
        self.grab = None;
        self.cur = None; // re-established by the next pointer event
        self.layout(true);
        self.dirty = true;
        true
    }

    /// Distribute heights: tags keep a fixed strip height, bodies split the
    /// remainder — proportionally to their previous heights, or equally
    /// when `reset` (after structural changes). The last flexible row
    /// absorbs the rounding remainder, so row heights plus frame gaps sum
    /// to the column height exactly.
    fn layout(&mut self, reset: bool) {
        let n = self.slots.len();
        if n == 0 {
            return;
        }
        let avail = (self.size.y - self.style.frame_px * (n as i32 - 1)).max(0);
        let tag_h = Tag::height(&self.metrics);

        let body_idx: Vec<usize> = (0..n).filter(|&i| !self.slots[i].is_tag).collect();
        let tag_count = (n - body_idx.len()) as i32;
        let body_avail = (avail - tag_count * tag_h).max(0);

        let mut heights = vec![0i32; n];
        for (i, h) in heights.iter_mut().enumerate() {
            if self.slots[i].is_tag {
                *h = tag_h;
            }
        }
        let prev: Vec<i32> = body_idx.iter().map(|&i| self.slots[i].rect.h).collect();
        let prev_total: i32 = prev.iter().sum();
        for (j, &i) in body_idx.iter().enumerate() {
            heights[i] = if reset || prev_total <= 0 {
                body_avail / body_idx.len() as i32
            } else {
                (body_avail as i64 * prev[j] as i64 / prev_total as i64) as i32
            };
        }
        let used: i32 = heights.iter().sum();
        let last = *body_idx.last().unwrap_or(&(n - 1));
        heights[last] = (heights[last] + avail - used).max(0);

        let mut y = 0;
        for (i, h) in heights.into_iter().enumerate() {
            self.slots[i].rect = Rect::new(0, y, self.size.x, h);
            self.slots[i].row.resize(Point::new(self.size.x, h));
            y += h + self.style.frame_px;
        }
    }

    pub fn resize(&mut self, size: Point) {
        self.size = size;
        self.layout(false);
        self.dirty = true;
    }

    fn row_at(&self, y: i32) -> Option<usize> {
        self.slots.iter().position(|s| y >= s.rect.y && y < s.rect.bottom())
    }

    pub fn draw(&mut self, dirty: bool, frame: &mut Frame) {
        let full = dirty || self.dirty;
        if full {
            let n = self.slots.len();
            for s in self.slots.iter().take(n.saturating_sub(1)) {
                let gap = Rect::new(0, s.rect.bottom(), self.size.x, self.style.frame_px);
                frame.fill(gap, self.style.frame);
            }
            let last_bottom = self.slots.last().map_or(0, |s| s.rect.bottom());
            if last_bottom < self.size.y {
                let rest = Rect::new(0, last_bottom, self.size.x, self.size.y - last_bottom);
                frame.fill(rest, self.style.col_bg);
            }
        }
        for s in &mut self.slots {
            let mut sub = frame.sub(s.rect);
            s.row.draw(full, &mut sub);
        }
        self.dirty = false;
    }

    pub fn tick(&mut self) -> bool {
        let mut any = false;
        for s in &mut self.slots {
            any |= s.row.tick();
        }
        any
    }

    pub fn focus(&mut self, focused: bool) {
        if let Some(cur) = self.cur {
            self.slots[cur].row.focus(focused);
        }
    }

    /// Move pointer focus to row `i`, returning whether it changed.
    fn focus_row(&mut self, i: usize) -> bool {
        if self.cur == Some(i) {
            return false;
        }
        if let Some(old) = self.cur {
            self.slots[old].row.focus(false);
        }
        self.slots[i].row.focus(true);
        self.cur = Some(i);
        true
    }

    pub fn pointer_move(&mut self, pt: Point) -> bool {
        let target = match self.grab {
            Some(i) => Some(i),
            None => self.row_at(pt.y),
        };
        let Some(i) = target else { return false };
        let mut redraw = false;
        if self.grab.is_none() {
            redraw = self.focus_row(i);
        }
        let local = Point::new(pt.x, pt.y - self.slots[i].rect.y);
        self.slots[i].row.pointer_move(local) || redraw
    }

    pub fn click(&mut self, pt: Point, button: i32) -> ClickOutcome {
        let press = button > 0;
        let target = if press { self.row_at(pt.y) } else { self.grab };
        let Some(i) = target else { return ClickOutcome::default() };
        if press {
            self.grab = Some(i);
            self.focus_row(i);
        } else {
            self.grab = None;
        }
        let local = Point::new(pt.x, pt.y - self.slots[i].rect.y);
        let (range, redraw) = self.slots[i].row.click(local, button);
        let mut out = ClickOutcome { redraw, cmd: None };
        if press && button == 2 && self.slots[i].is_tag && range[0] < range[1] {
            let text = self.slots[i].row.text();
            let word: String = text.chars().skip(range[0]).take(range[1] - range[0]).collect();
            if let Some(cmd) = Cmd::parse(&word) {
                out.cmd = Some((cmd, i));
            }
        }
        out
    }

    pub fn wheel(&mut self, pt: Point, x: i32, y: i32) -> bool {
        let Some(i) = self.row_at(pt.y) else { return false };
        self.slots[i].row.wheel(x, y)
    }

    pub fn dir(&mut self, x: i32, y: i32) -> bool {
        let Some(cur) = self.cur else { return false };
        self.slots[cur].row.dir(x, y)
    }

    pub fn modifier(&mut self, m: i32) -> bool {
        let Some(cur) = self.cur else { return false };
        self.slots[cur].row.modifier(m)
    }

    pub fn rune(&mut self, r: char) -> bool {
        let Some(cur) = self.cur else { return false };
        self.slots[cur].row.rune(r)
    }
}
