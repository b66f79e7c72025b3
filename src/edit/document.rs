// src/edit/document.rs

//! Line-oriented document snapshot with positions and selections.
//!
//! Positions are zero-based (line, column) pairs where the column counts
//! characters, not bytes. A selection is an anchor/active pair; the two may
//! be in either order, and an empty selection is a cursor.

use std::cmp::Ordering;
use std::path::Path;

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// A cursor: an empty selection at `position`.
    pub fn cursor(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// The earlier of the two endpoints.
    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    /// The later of the two endpoints.
    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }
}

/// Immutable snapshot of a text buffer, split into lines.
#[derive(Debug, Clone, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `idx`, or an empty string out of range.
    pub fn line(&self, idx: usize) -> &str {
        self.lines.get(idx).map_or("", String::as_str)
    }

    /// Whether the line is empty or whitespace-only.
    pub fn is_blank(&self, idx: usize) -> bool {
        self.line(idx).trim().is_empty()
    }

    /// Extract the text covered by `selection`, joined with newlines.
    ///
    /// Columns beyond a line's end clamp to the end of that line.
    pub fn text_in(&self, selection: &Selection) -> String {
        let start = selection.start();
        let end = selection.end();
        if start.line == end.line {
            let line = self.line(start.line);
            let from = col_to_byte(line, start.column);
            let to = col_to_byte(line, end.column).max(from);
            return line[from..to].to_string();
        }
        let mut parts = Vec::with_capacity(end.line - start.line + 1);
        let first = self.line(start.line);
        parts.push(&first[col_to_byte(first, start.column)..]);
        for idx in start.line + 1..end.line {
            parts.push(self.line(idx));
        }
        let last = self.line(end.line);
        parts.push(&last[..col_to_byte(last, end.column)]);
        parts.join("\n")
    }
}

fn col_to_byte(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(idx, _)| idx)
}
