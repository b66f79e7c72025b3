// src/relay/sink.rs

//! Feedback sink: presents interpreter output to the user.

use std::sync::Arc;

use crate::relay::ansi::strip_ansi;
use crate::types::FeedbackStyle;
use crate::ui::EditorUi;

/// Presents text chunks via the configured [`FeedbackStyle`].
///
/// Created when the interpreter starts and dropped with the session; the
/// style stays immutable for the lifetime of one process handle.
pub struct FeedbackSink {
    style: FeedbackStyle,
    ui: Arc<dyn EditorUi>,
}

impl FeedbackSink {
    pub fn new(style: FeedbackStyle, ui: Arc<dyn EditorUi>) -> Self {
        Self { style, ui }
    }

    pub fn style(&self) -> FeedbackStyle {
        self.style
    }

    /// Strip escape sequences and present one chunk.
    ///
    /// A chunk with embedded newlines becomes a single log entry; chunks
    /// are never split or merged here.
    pub fn present(&self, chunk: &str) {
        let clean = strip_ansi(chunk);
        match self.style {
            FeedbackStyle::Notify => self.ui.notify_info(&clean),
            FeedbackStyle::Log => self.ui.append_log(&clean),
        }
    }
}
