//! Column and window geometry: conservation, routing, gap clicks.

mod common;

use common::{metrics, style};
use muntin::geom::Point;
use muntin::ui::{Col, Win};

fn col_with_sheets(n: usize) -> Col {
    let mut col = Col::new(style(), metrics(), 1.0);
    for _ in 0..n {
        col.add_sheet(" | Del", "some\ntext\n");
    }
    col
}

#[test]
fn column_heights_sum_exactly() {
    let mut col = col_with_sheets(2);
    let frame_px = 1;
    for h in [311, 480, 123, 999, 640] {
        col.resize(Point::new(200, h));
        let bounds = col.row_bounds();
        let heights: i32 = bounds.iter().map(|r| r.h).sum();
        let gaps = frame_px * (bounds.len() as i32 - 1);
        assert_eq!(heights + gaps, h, "height {h} not conserved");
        assert!(bounds.iter().all(|r| r.h >= 0), "negative height at {h}");
    }
}

#[test]
fn repeated_resize_preserves_shares() {
    let mut col = col_with_sheets(2);
    col.resize(Point::new(200, 600));
    let before = col.row_bounds();
    col.resize(Point::new(200, 1200));
    col.resize(Point::new(200, 600));
    let after = col.row_bounds();
    for (a, b) in before.iter().zip(&after) {
        assert!((a.h - b.h).abs() <= 1, "share drifted: {} vs {}", a.h, b.h);
    }
}

#[test]
fn rows_are_stacked_without_overlap() {
    let mut col = col_with_sheets(2);
    col.resize(Point::new(200, 500));
    let bounds = col.row_bounds();
    for pair in bounds.windows(2) {
        assert_eq!(pair[1].y, pair[0].bottom() + 1); // one frame pixel apart
    }
    assert!(bounds.iter().all(|r| r.w == 200));
}

#[test]
fn click_in_frame_gap_is_noop() {
    let mut col = col_with_sheets(1);
    col.resize(Point::new(200, 400));
    let gap_y = col.row_bounds()[0].bottom();
    let out = col.click(Point::new(10, gap_y), 1);
    assert!(!out.redraw);
    assert!(out.cmd.is_none());
}

#[test]
fn window_widths_sum_exactly() {
    let mut win = Win::new(style(), metrics(), 1.0);
    win.resize(Point::new(800, 600));
    win.add_col();
    win.add_col();
    for w in [1001, 640, 333] {
        win.resize(Point::new(w, 600));
        let bounds = win.col_bounds();
        let widths: i32 = bounds.iter().map(|r| r.w).sum();
        assert_eq!(widths + 2, w, "width {w} not conserved"); // two 1px frames
        assert!(bounds.iter().all(|r| r.h == 600));
    }
}

#[test]
fn click_routes_to_column_under_x() {
    let mut win = Win::new(style(), metrics(), 1.0);
    win.resize(Point::new(800, 600));
    win.add_col();
    // grow a sheet in column 1 only; a press in its tag must not disturb
    // column 0
    let x_in_col1 = win.col_bounds()[1].x + 10;
    assert_eq!(win.col(0).row_count(), 1);
    assert_eq!(win.col(1).row_count(), 1);
    win.click(Point::new(x_in_col1, 5), 1);
    win.click(Point::new(x_in_col1, 5), -1);
    assert_eq!(win.col(0).row_count(), 1);
}

#[test]
fn degenerate_heights_do_not_go_negative() {
    let mut col = col_with_sheets(3);
    col.resize(Point::new(100, 20));
    assert!(col.row_bounds().iter().all(|r| r.h >= 0));
}
