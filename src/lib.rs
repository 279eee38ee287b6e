//! muntin — a tiled text-editing surface.
//!
//! A window is subdivided into columns; each column stacks rows: one-line
//! "tag" strips and scrollable, wrapped "body" editors. Every element
//! implements one uniform event contract ([`ui::Row`]) and reports damage
//! upward as return values, so the shell repaints only what changed.

pub mod cli;
pub mod click;
pub mod config;
pub mod event;
pub mod geom;
pub mod input;
pub mod render;
pub mod sched;
pub mod text;
pub mod tracing;
pub mod ui;

// Re-export commonly used types
pub use config::Style;
pub use event::Event;
pub use geom::{Point, Rect};
pub use render::{Frame, GlyphSource, Metrics};
pub use ui::{Body, Col, Cmd, Row, Tag, Win};
