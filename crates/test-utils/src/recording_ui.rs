#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use sardine_bridge::ui::EditorUi;

/// Everything a [`RecordingUi`] has been asked to show, in order per surface.
#[derive(Debug, Clone, Default)]
pub struct UiRecord {
    pub info: Vec<String>,
    pub errors: Vec<String>,
    pub log: Vec<String>,
    pub status: Vec<String>,
    pub status_cleared: usize,
}

/// `EditorUi` implementation that records every call for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    record: Arc<Mutex<UiRecord>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn snapshot(&self) -> UiRecord {
        self.record.lock().unwrap().clone()
    }
}

impl EditorUi for RecordingUi {
    fn notify_info(&self, message: &str) {
        self.record.lock().unwrap().info.push(message.to_string());
    }

    fn notify_error(&self, message: &str) {
        self.record.lock().unwrap().errors.push(message.to_string());
    }

    fn append_log(&self, chunk: &str) {
        self.record.lock().unwrap().log.push(chunk.to_string());
    }

    fn set_status(&self, label: &str) {
        self.record.lock().unwrap().status.push(label.to_string());
    }

    fn clear_status(&self) {
        self.record.lock().unwrap().status_cleared += 1;
    }
}
