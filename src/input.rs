//! winit → core event translation.

use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, ModifiersState, NamedKey};

use crate::event::Event;
use crate::geom::Point;
use crate::ui::{DIR_END, DIR_HOME};

/// Button code: 1 left, 2 middle, 3 right. Extra buttons are ignored.
pub fn button_code(button: MouseButton) -> Option<i32> {
    match button {
        MouseButton::Left => Some(1),
        MouseButton::Middle => Some(2),
        MouseButton::Right => Some(3),
        _ => None,
    }
}

/// A click event with the sign encoding press/release.
pub fn click_event(pos: Point, button: MouseButton, state: ElementState) -> Option<Event> {
    let code = button_code(button)?;
    let signed = if state == ElementState::Pressed { code } else { -code };
    Some(Event::Click { pos, button: signed })
}

/// Wheel deltas as whole line/column steps; positive y scrolls down.
pub fn wheel_event(pos: Point, delta: MouseScrollDelta, line_height: i32) -> Option<Event> {
    let (x, y) = match delta {
        MouseScrollDelta::LineDelta(dx, dy) => (dx.round() as i32, (-dy).round() as i32),
        MouseScrollDelta::PixelDelta(p) => {
            let lh = line_height.max(1) as f64;
            ((p.x / lh).round() as i32, (-p.y / lh).round() as i32)
        }
    };
    (x != 0 || y != 0).then_some(Event::Wheel { pos, x, y })
}

/// Directional code for a navigation key, if it is one.
pub fn dir_for_key(key: &Key) -> Option<(i32, i32)> {
    let Key::Named(named) = key else { return None };
    match named {
        NamedKey::ArrowUp => Some((0, -1)),
        NamedKey::ArrowDown => Some((0, 1)),
        NamedKey::ArrowLeft => Some((-1, 0)),
        NamedKey::ArrowRight => Some((1, 0)),
        NamedKey::PageUp => Some((0, -2)),
        NamedKey::PageDown => Some((0, 2)),
        NamedKey::Home => Some((0, DIR_HOME)),
        NamedKey::End => Some((0, DIR_END)),
        _ => None,
    }
}

/// The rune a key press types. Enter normalizes to '\n'; backspace and
/// forward delete are delivered as the control runes '\u{8}' and '\u{7f}'.
pub fn rune_for_key(key: &Key) -> Option<char> {
    match key {
        Key::Named(NamedKey::Enter) => Some('\n'),
        Key::Named(NamedKey::Backspace) => Some('\u{8}'),
        Key::Named(NamedKey::Delete) => Some('\u{7f}'),
        Key::Named(NamedKey::Tab) => Some('\t'),
        Key::Named(NamedKey::Space) => Some(' '),
        Key::Character(s) => {
            let mut chars = s.chars();
            let ch = chars.next()?;
            chars.next().is_none().then_some(ch)
        }
        _ => None,
    }
}

/// The modifier vector {none, shift, alt, control-or-meta} for a platform
/// modifier state.
pub fn modifier_flags(state: ModifiersState) -> [bool; 4] {
    [
        false,
        state.shift_key(),
        state.alt_key(),
        state.control_key() || state.super_key(),
    ]
}

/// The single edge between two modifier vectors, if any: +i press,
/// -i release. The platform reports one key transition per event, so at
/// most one flag differs.
pub fn modifier_edge(old: [bool; 4], new: [bool; 4]) -> Option<i32> {
    (1..4)
        .find(|&i| old[i] != new[i])
        .map(|i| if new[i] { i as i32 } else { -(i as i32) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_edge_is_single_and_signed() {
        let none = [false; 4];
        let shift = [false, true, false, false];
        assert_eq!(modifier_edge(none, shift), Some(1));
        assert_eq!(modifier_edge(shift, none), Some(-1));
        assert_eq!(modifier_edge(shift, shift), None);
        let ctrl = [false, false, false, true];
        assert_eq!(modifier_edge(none, ctrl), Some(3));
    }

    #[test]
    fn wheel_rounds_to_line_steps() {
        let pos = Point::ZERO;
        match wheel_event(pos, MouseScrollDelta::LineDelta(0.0, 1.0), 16) {
            Some(Event::Wheel { y, .. }) => assert_eq!(y, -1),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(wheel_event(pos, MouseScrollDelta::LineDelta(0.0, 0.0), 16), None);
    }
}
