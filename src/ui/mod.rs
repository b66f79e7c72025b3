// src/ui/mod.rs

//! Editor-facing presentation seam.
//!
//! Everything the bridge shows the user goes through [`EditorUi`], so the
//! relay core stays independent of the frontend. The console frontend lives
//! here; tests substitute a recording implementation.

pub mod console;

pub use console::ConsoleUi;

/// Surface for user-visible feedback.
pub trait EditorUi: Send + Sync {
    /// Transient informational notification.
    fn notify_info(&self, message: &str);

    /// Transient error notification.
    fn notify_error(&self, message: &str);

    /// Append a chunk to the persistent output log.
    fn append_log(&self, chunk: &str);

    /// Show a persistent status indicator with the given label.
    fn set_status(&self, label: &str);

    /// Remove the status indicator. Must be a no-op when it is already
    /// gone, so teardown paths can call it unconditionally.
    fn clear_status(&self);
}
