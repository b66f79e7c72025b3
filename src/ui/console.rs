// src/ui/console.rs

//! Console frontend for the bridge.
//!
//! Notifications and status changes go to stderr so the interpreter's own
//! output (the log) stays clean on stdout.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ui::EditorUi;

#[derive(Debug, Default)]
pub struct ConsoleUi {
    status_shown: AtomicBool,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EditorUi for ConsoleUi {
    fn notify_info(&self, message: &str) {
        eprintln!("[sardine] {message}");
    }

    fn notify_error(&self, message: &str) {
        eprintln!("[sardine:error] {message}");
    }

    fn append_log(&self, chunk: &str) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = out.write_all(chunk.as_bytes());
        let _ = out.flush();
    }

    fn set_status(&self, label: &str) {
        self.status_shown.store(true, Ordering::SeqCst);
        eprintln!("[sardine] status: {label}");
    }

    fn clear_status(&self) {
        if self.status_shown.swap(false, Ordering::SeqCst) {
            eprintln!("[sardine] status cleared");
        }
    }
}
