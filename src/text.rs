//! Character-indexed text storage with a directional selection.
//!
//! Offsets are character indices, not bytes, so they stay valid across
//! multi-byte inserts and deletes.

use std::ops::Range;

use ropey::Rope;

/// A selection as an (anchor, point) pair of character offsets. The anchor
/// stays fixed while the point moves; `point < anchor` is a valid backwards
/// selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub point: usize,
}

impl Selection {
    /// A collapsed selection (caret only).
    pub fn caret(at: usize) -> Self {
        Self { anchor: at, point: at }
    }

    pub fn new(anchor: usize, point: usize) -> Self {
        Self { anchor, point }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.point
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.point)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.point)
    }

    /// The selection as an ordered [start, end] offset pair.
    pub fn range(&self) -> [usize; 2] {
        [self.start(), self.end()]
    }
}

/// Character class for word-enclosure selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Word,
    Punct,
}

fn char_class(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

/// Mutable character sequence owning its cursor/selection offsets.
///
/// Invariant: `0 <= anchor, point <= len()` at all times; every setter
/// clamps.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    sel: Selection,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self { rope: Rope::from_str(s), sel: Selection::default() }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Slice by character offsets.
    pub fn slice(&self, range: Range<usize>) -> String {
        self.rope.slice(range).to_string()
    }

    pub fn selection(&self) -> Selection {
        self.sel
    }

    pub fn caret(&self) -> usize {
        self.sel.point
    }

    /// Collapse the selection to a caret. Returns whether anything changed.
    pub fn set_caret(&mut self, at: usize) -> bool {
        let next = Selection::caret(at.min(self.len()));
        let changed = next != self.sel;
        self.sel = next;
        changed
    }

    pub fn select(&mut self, anchor: usize, point: usize) -> bool {
        let len = self.len();
        let next = Selection::new(anchor.min(len), point.min(len));
        let changed = next != self.sel;
        self.sel = next;
        changed
    }

    /// Move the selection point, keeping the anchor.
    pub fn extend_to(&mut self, point: usize) -> bool {
        let point = point.min(self.len());
        let changed = point != self.sel.point;
        self.sel.point = point;
        changed
    }

    /// Insert at the caret, replacing any selection.
    pub fn insert_str(&mut self, s: &str) {
        let [a, b] = self.sel.range();
        if a != b {
            self.rope.remove(a..b);
        }
        self.rope.insert(a, s);
        self.sel = Selection::caret(a + s.chars().count());
    }

    pub fn insert(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut tmp));
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) -> bool {
        let [a, b] = self.sel.range();
        if a != b {
            self.rope.remove(a..b);
            self.sel = Selection::caret(a);
            true
        } else if a > 0 {
            self.rope.remove(a - 1..a);
            self.sel = Selection::caret(a - 1);
            true
        } else {
            false
        }
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete_forward(&mut self) -> bool {
        let [a, b] = self.sel.range();
        if a != b {
            self.rope.remove(a..b);
            self.sel = Selection::caret(a);
            true
        } else if a < self.len() {
            self.rope.remove(a..a + 1);
            true
        } else {
            false
        }
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn line_of(&self, off: usize) -> usize {
        self.rope.char_to_line(off.min(self.len()))
    }

    pub fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(line)
    }

    /// Character length of a line, excluding its terminator.
    pub fn line_len(&self, line: usize) -> usize {
        let sl = self.rope.line(line);
        let mut n = sl.len_chars();
        if n > 0 && sl.char(n - 1) == '\n' {
            n -= 1;
        }
        n
    }

    /// The maximal run of same-class characters enclosing `off`.
    pub fn word_at(&self, off: usize) -> [usize; 2] {
        let len = self.len();
        if len == 0 {
            return [0, 0];
        }
        let probe = off.min(len - 1);
        let class = char_class(self.rope.char(probe));
        let mut start = probe;
        while start > 0 && char_class(self.rope.char(start - 1)) == class {
            start -= 1;
        }
        let mut end = probe + 1;
        while end < len && char_class(self.rope.char(end)) == class {
            end += 1;
        }
        [start, end]
    }

    /// The line enclosing `off`, including its trailing newline if present.
    pub fn line_at(&self, off: usize) -> [usize; 2] {
        let line = self.line_of(off);
        let start = self.line_start(line);
        [start, start + self.rope.line(line).len_chars()]
    }

    /// Caret left/right by one character. A non-empty selection collapses
    /// toward the edge in the direction of travel.
    pub fn move_horizontal(&mut self, delta: i32) -> bool {
        if !self.sel.is_empty() {
            let to = if delta < 0 { self.sel.start() } else { self.sel.end() };
            self.sel = Selection::caret(to);
            return true;
        }
        let at = self.caret();
        let to = if delta < 0 {
            at.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (at + delta as usize).min(self.len())
        };
        self.set_caret(to)
    }

    /// Caret up/down by `delta` logical lines, clamping the column.
    pub fn move_vertical(&mut self, delta: i32) -> bool {
        let at = self.caret();
        let line = self.line_of(at);
        let col = at - self.line_start(line);
        let last = self.line_count() - 1;
        let target = if delta < 0 {
            line.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (line + delta as usize).min(last)
        };
        let to = self.line_start(target) + col.min(self.line_len(target));
        self.set_caret(to)
    }

    pub fn to_start(&mut self) -> bool {
        self.set_caret(0)
    }

    pub fn to_end(&mut self) -> bool {
        let len = self.len();
        self.set_caret(len)
    }
}
