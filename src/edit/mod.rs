// src/edit/mod.rs

//! Document and selection model for dispatching code to the interpreter.

pub mod dispatch;
pub mod document;

pub use dispatch::{collapse_to_cursors, expand_selection, expand_to_context};
pub use document::{Document, Position, Selection};
