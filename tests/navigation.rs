//! Directional navigation, paging, boundary jumps, and scrolling.

mod common;

use common::{metrics, style, CELL_H, CELL_W};
use muntin::geom::Point;
use muntin::ui::{Body, Row, DIR_END, DIR_HOME};

fn body(text: &str) -> Body {
    let mut b = Body::new(text, style(), metrics(), 1.0);
    b.resize(Point::new(400, 10 * CELL_H));
    b
}

fn pt_for(col: i32, row: i32) -> Point {
    Point::new(7 + col * CELL_W, row * CELL_H)
}

#[test]
fn home_and_end_jump_and_are_idempotent() {
    let mut b = body("one\ntwo\nthree\n");
    b.click(pt_for(1, 1), 1);
    b.click(pt_for(1, 1), -1);
    assert_eq!(b.caret(), 5);

    assert!(b.dir(0, DIR_HOME));
    assert_eq!(b.caret(), 0);
    // second home is a no-op: no further redraw needed
    assert!(!b.dir(0, DIR_HOME));

    assert!(b.dir(0, DIR_END));
    assert_eq!(b.caret(), "one\ntwo\nthree\n".chars().count());
    assert!(!b.dir(0, DIR_END));
}

#[test]
fn arrows_move_one_unit() {
    let mut b = body("one\ntwo\nthree\n");
    assert!(b.dir(1, 0));
    assert_eq!(b.caret(), 1);
    assert!(b.dir(0, 1));
    assert_eq!(b.caret(), 5); // line 1, column 1
    assert!(b.dir(-1, 0));
    assert_eq!(b.caret(), 4);
    assert!(b.dir(0, -1));
    assert_eq!(b.caret(), 0);
}

#[test]
fn left_at_start_is_a_noop() {
    let mut b = body("one\ntwo\n");
    assert!(!b.dir(-1, 0));
    assert!(!b.dir(0, -1) || b.caret() == 0);
}

#[test]
fn page_moves_by_view_height() {
    let text = "aaaa\n".repeat(100);
    let mut b = body(&text);
    assert!(b.dir(0, 2));
    // the view is 10 rows tall, each line 5 chars
    assert_eq!(b.caret(), 50);
    assert!(b.scroll_top() > 0);
    assert!(b.dir(0, -2));
    assert_eq!(b.caret(), 0);
}

#[test]
fn arrow_collapses_selection_before_moving() {
    let mut b = body("hello world\n");
    b.click(pt_for(2, 0), 1);
    b.click(pt_for(2, 0), -1);
    b.click(pt_for(2, 0), 1); // double: selects "hello"
    b.click(pt_for(2, 0), -1);
    assert_eq!(b.selection().range(), [0, 5]);
    assert!(b.dir(1, 0));
    assert_eq!(b.caret(), 5);
    assert!(b.selection().is_empty());
}

#[test]
fn wheel_scrolls_and_clamps() {
    let text = "line\n".repeat(50);
    let mut b = body(&text);
    assert!(b.wheel(0, 3));
    assert_eq!(b.scroll_top(), 3);
    assert!(b.wheel(0, -2));
    assert_eq!(b.scroll_top(), 1);
    assert!(b.wheel(0, -5));
    assert_eq!(b.scroll_top(), 0);
    // already at the top: nothing to repaint
    assert!(!b.wheel(0, -1));
}

#[test]
fn end_scrolls_caret_into_view() {
    let text = "line\n".repeat(50);
    let mut b = body(&text);
    assert!(b.dir(0, DIR_END));
    let visible = 10;
    assert!(b.scroll_top() + visible > 50);
}

#[test]
#[should_panic(expected = "axis-aligned")]
fn diagonal_dir_is_rejected() {
    let mut b = body("x");
    b.dir(1, 1);
}

#[test]
fn long_lines_wrap_instead_of_overflowing() {
    // 400px wide, 7px pads: 48 columns; an 80-char line takes 2 rows
    let mut b = body(&format!("{}\n", "x".repeat(80)));
    let (range, _) = b.click(Point::new(7 + 2 * CELL_W, CELL_H), 1);
    assert_eq!(range, [50, 50]); // row 1 starts at char 48
}
