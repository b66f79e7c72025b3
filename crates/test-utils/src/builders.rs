#![allow(dead_code)]

use sardine_bridge::edit::{Document, Position, Selection};

/// Build a document from one string per line.
pub fn doc(lines: &[&str]) -> Document {
    Document::from_text(&lines.join("\n"))
}

/// An empty selection at (line, column).
pub fn cursor(line: usize, column: usize) -> Selection {
    Selection::cursor(Position::new(line, column))
}

/// A forward selection between two (line, column) pairs.
pub fn span(from: (usize, usize), to: (usize, usize)) -> Selection {
    Selection::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
}
