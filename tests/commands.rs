//! Tag command execution: Add / Del / AddCol / DelCol, plus key routing.

mod common;

use common::{metrics, style, CELL_W};
use muntin::geom::Point;
use muntin::ui::{Cmd, Win};

fn win() -> Win {
    let mut w = Win::new(style(), metrics(), 1.0);
    w.resize(Point::new(800, 600));
    w
}

/// Middle press+release over character `col` of the tag at `origin`.
fn exec_at(w: &mut Win, origin: Point, col: i32) {
    let pt = Point::new(origin.x + 7 + col * CELL_W, origin.y + 5);
    w.click(pt, 2);
    w.click(pt, -2);
}

#[test]
fn cmd_parse_recognizes_tag_words() {
    assert_eq!(Cmd::parse("Add"), Some(Cmd::Add));
    assert_eq!(Cmd::parse(" Del "), Some(Cmd::Del));
    assert_eq!(Cmd::parse("AddCol"), Some(Cmd::AddCol));
    assert_eq!(Cmd::parse("DelCol"), Some(Cmd::DelCol));
    assert_eq!(Cmd::parse("add"), None);
    assert_eq!(Cmd::parse("hello"), None);
}

#[test]
fn middle_click_addcol_adds_a_column() {
    let mut w = win();
    assert_eq!(w.col_count(), 1);
    // the column tag reads "AddCol DelCol Add"; press inside the first word
    exec_at(&mut w, Point::ZERO, 1);
    assert_eq!(w.col_count(), 2);
}

#[test]
fn middle_click_delcol_removes_the_clicked_column() {
    let mut w = win();
    exec_at(&mut w, Point::ZERO, 1); // AddCol
    assert_eq!(w.col_count(), 2);
    let col1 = w.col_bounds()[1];
    exec_at(&mut w, col1.origin(), 8); // "DelCol" starts at character 7
    assert_eq!(w.col_count(), 1);
}

#[test]
fn last_column_cannot_be_deleted() {
    let mut w = win();
    exec_at(&mut w, Point::ZERO, 8); // DelCol on the only column
    assert_eq!(w.col_count(), 1);
}

#[test]
fn middle_click_add_creates_a_sheet() {
    let mut w = win();
    assert_eq!(w.col(0).row_count(), 1);
    exec_at(&mut w, Point::ZERO, 15); // "Add" starts at character 14
    assert_eq!(w.col(0).row_count(), 3);
    assert_eq!(w.col(0).row_text(1), " | Del");
}

#[test]
fn middle_click_del_removes_the_sheet() {
    let mut w = win();
    w.add_sheet(" | Del", "contents");
    assert_eq!(w.col(0).row_count(), 3);
    let sheet_tag = w.col(0).row_bounds()[1];
    exec_at(&mut w, sheet_tag.origin(), 4); // "Del" starts at character 3
    assert_eq!(w.col(0).row_count(), 1);
}

#[test]
fn middle_click_on_plain_word_does_nothing() {
    let mut w = win();
    w.add_sheet("notes.txt | Del", "contents");
    let sheet_tag = w.col(0).row_bounds()[1];
    exec_at(&mut w, sheet_tag.origin(), 1); // inside "notes.txt"
    assert_eq!(w.col(0).row_count(), 3);
    assert_eq!(w.col_count(), 1);
}

#[test]
fn runes_route_to_the_row_under_the_pointer() {
    let mut w = win();
    w.add_sheet(" | Del", "");
    let body = w.col(0).row_bounds()[2];
    w.pointer_move(Point::new(10, body.y + 5));
    assert!(w.rune('h'));
    assert!(w.rune('i'));
    assert_eq!(w.col(0).row_text(2), "hi");
    assert!(w.rune('\u{8}'));
    assert_eq!(w.col(0).row_text(2), "h");
}

#[test]
fn dir_routes_to_the_row_under_the_pointer() {
    let mut w = win();
    w.add_sheet(" | Del", "alpha\nbeta\n");
    let body = w.col(0).row_bounds()[2];
    w.pointer_move(Point::new(10, body.y + 5));
    assert!(w.dir(1, 0));
    // typing lands after the moved caret
    assert!(w.rune('X'));
    assert_eq!(w.col(0).row_text(2), "aXlpha\nbeta\n");
}
