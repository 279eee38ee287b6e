//! The element tree: rows, columns, and the window.

pub mod body;
pub mod col;
pub mod tag;
pub mod win;

pub use body::Body;
pub use col::Col;
pub use tag::Tag;
pub use win::Win;

use crate::geom::Point;
use crate::render::Frame;

/// Directional code for a start-of-buffer jump.
pub const DIR_HOME: i32 = i16::MIN as i32;

/// Directional code for an end-of-buffer jump.
pub const DIR_END: i32 = i16::MAX as i32;

/// Ticks between cursor blink phase flips (20ms ticks, 500ms phase).
pub const BLINK_TICKS: u32 = 25;

/// The uniform contract every element in a column implements.
///
/// All coordinates are relative to the row itself, (0,0) top-left; callers
/// translate before dispatching. "Needs redraw" results bubble up as return
/// values instead of the row holding any reference to its parent.
pub trait Row {
    /// Repaint. `dirty` forces the full bounds; otherwise only damage
    /// accumulated since the last draw is repainted, so calling with
    /// nothing changed touches no pixels.
    fn draw(&mut self, dirty: bool, frame: &mut Frame);

    /// Focus state change; drives cursor visibility. Side effect only.
    fn focus(&mut self, focused: bool);

    /// New layout bounds. Rewraps text if the width changed.
    fn resize(&mut self, size: Point);

    /// Periodic tick; advances blink state. Returns true iff the change
    /// needs a repaint. Must not block.
    fn tick(&mut self) -> bool;

    /// Pointer motion; drag-selection feedback while a button is held.
    fn pointer_move(&mut self, pt: Point) -> bool;

    /// Button event: positive button code = press, negative = release of
    /// the same magnitude. A press consults the click classifier: count 1
    /// sets the caret, 2 selects the enclosing word, 3 the enclosing line.
    /// Returns the resulting selection in character offsets plus
    /// needs-redraw; release finalizes an in-progress drag.
    fn click(&mut self, pt: Point, button: i32) -> ([usize; 2], bool);

    /// Scroll by line/column steps: y<0 up, y>0 down, x likewise.
    fn wheel(&mut self, x: i32, y: i32) -> bool;

    /// Directional key press. An absolute value of 1 is one unit (character
    /// horizontally, line vertically), 2 is a page (vertical only),
    /// [`DIR_HOME`]/[`DIR_END`] jump to the buffer start/end. Other x
    /// magnitudes are ignored. Exactly one axis is non-zero.
    fn dir(&mut self, x: i32, y: i32) -> bool;

    /// Modifier edge: |m| is 1 shift, 2 alt, 3 control/meta; sign is
    /// press/release. Alters selection extension during drags.
    fn modifier(&mut self, m: i32) -> bool;

    /// Typed character; replaces any selection. '\u{8}' deletes backward,
    /// '\u{7f}' deletes forward.
    fn rune(&mut self, r: char) -> bool;

    /// Full buffer contents — lets an owner resolve command words from a
    /// click range without a parent back-reference.
    fn text(&self) -> String;
}

/// Commands recognized in tag text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// New sheet in the clicked column.
    Add,
    /// Delete the clicked sheet.
    Del,
    /// New column on the right.
    AddCol,
    /// Delete the clicked column.
    DelCol,
}

impl Cmd {
    pub fn parse(word: &str) -> Option<Cmd> {
        match word.trim() {
            "Add" => Some(Cmd::Add),
            "Del" => Some(Cmd::Del),
            "AddCol" => Some(Cmd::AddCol),
            "DelCol" => Some(Cmd::DelCol),
            _ => None,
        }
    }
}
