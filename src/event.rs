//! The serialized event vocabulary.
//!
//! Every input the core sees arrives as one of these, in strict arrival
//! order, on the event loop thread. The tick producer feeds the same queue
//! through the event-loop proxy, so the element tree never observes a
//! concurrent call.

use crate::geom::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Surface size or DPI changed. A zero-area size begins teardown.
    Resize { size: Point, dpi: f32 },
    /// Window-level focus gained or lost.
    Focus(bool),
    /// Pointer moved (with or without a button held).
    Move(Point),
    /// Button press (positive code) or release (negative) at a position.
    Click { pos: Point, button: i32 },
    /// Scroll by whole line/column steps.
    Wheel { pos: Point, x: i32, y: i32 },
    /// Directional key press; exactly one axis is non-zero.
    Dir { x: i32, y: i32 },
    /// Modifier edge: |m| is the flag index, sign is press/release.
    Mod(i32),
    /// Typed character (press only).
    Rune(char),
    /// Periodic tick from the scheduler.
    Tick,
    /// Begin teardown.
    Shutdown,
}
