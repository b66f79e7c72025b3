// src/edit/dispatch.rs

//! Selection context expansion and collapse.
//!
//! The interpreter evaluates whole blocks, so a cursor or partial selection
//! grows to the surrounding run of non-blank lines before dispatch. A
//! selection whose endpoints sit on blank lines stays where it is (its text
//! is blank and dispatching it is harmless).

use crate::edit::document::{Document, Position, Selection};

/// Expand `selection` to the contiguous block of non-blank lines around it.
///
/// The result covers whole lines: column 0 of the top line through the end
/// of the bottom line.
pub fn expand_selection(doc: &Document, selection: &Selection) -> Selection {
    if doc.line_count() == 0 {
        return Selection::cursor(Position::new(0, 0));
    }
    let last = doc.line_count() - 1;
    let mut top = selection.start().line.min(last);
    let mut bottom = selection.end().line.min(last);

    if !doc.is_blank(top) {
        while top > 0 && !doc.is_blank(top - 1) {
            top -= 1;
        }
    }
    if !doc.is_blank(bottom) {
        while bottom < last && !doc.is_blank(bottom + 1) {
            bottom += 1;
        }
    }

    Selection::new(
        Position::new(top, 0),
        Position::new(bottom, doc.line(bottom).chars().count()),
    )
}

/// Expand every selection in place.
pub fn expand_to_context(doc: &Document, selections: &mut [Selection]) {
    for selection in selections.iter_mut() {
        *selection = expand_selection(doc, selection);
    }
}

/// Collapse every selection to a cursor at its active end.
pub fn collapse_to_cursors(selections: &mut [Selection]) {
    for selection in selections.iter_mut() {
        *selection = Selection::cursor(selection.active);
    }
}
