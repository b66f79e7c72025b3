// src/relay/mod.rs

//! Process relay core: supervisor, output routing, feedback sink.
//!
//! This is the only part of the bridge with real ordering concerns. The
//! supervisor owns the interpreter child process; its reader tasks forward
//! output chunks as [`SessionEvent`]s into the session's single event loop,
//! which routes each chunk through the one-shot hook table to the feedback
//! sink.

pub mod ansi;
pub mod router;
pub mod session;
pub mod sink;
pub mod supervisor;

pub use ansi::strip_ansi;
pub use router::{HookFn, OutputRouter, OutputStream};
pub use session::Session;
pub use sink::FeedbackSink;
pub use supervisor::{SessionEvent, SpawnOptions, Supervisor};
