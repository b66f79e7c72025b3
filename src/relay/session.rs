// src/relay/session.rs

//! Session facade tying supervisor, router, sink and UI together.
//!
//! All session methods run on the frontend's single event loop, so command
//! handling and output routing never interleave mid-operation. The sink
//! exists exactly while an interpreter process does; output arriving with
//! no sink is dropped.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ConfigFile;
use crate::edit::{collapse_to_cursors, expand_to_context, Document, Selection};
use crate::errors::Result;
use crate::relay::router::{HookFn, OutputRouter, OutputStream};
use crate::relay::sink::FeedbackSink;
use crate::relay::supervisor::{SessionEvent, SpawnOptions, Supervisor};
use crate::types::FeedbackStyle;
use crate::ui::EditorUi;

/// Prefix echoed before each dispatched block.
const ECHO_MARKER: &str = ">>> ";

const STATUS_LABEL: &str = "Sardine";

pub struct Session {
    supervisor: Supervisor,
    router: OutputRouter,
    sink: Option<FeedbackSink>,
    ui: Arc<dyn EditorUi>,
    style: FeedbackStyle,
    configured_path: Option<String>,
    status_active: bool,
}

impl Session {
    /// Build a session from config. Returns the event receiver the caller
    /// must drain and feed back through [`Session::handle_event`].
    pub fn new(
        config: &ConfigFile,
        style: FeedbackStyle,
        ui: Arc<dyn EditorUi>,
    ) -> (Self, tokio::sync::mpsc::Receiver<SessionEvent>) {
        let (events_tx, events_rx) = tokio::sync::mpsc::channel(64);
        let options = SpawnOptions {
            sardine_path: config.sardine.path.clone(),
            sclang_path: config.sardine.sclang_path.clone(),
        };
        let session = Self {
            supervisor: Supervisor::new(options, events_tx),
            router: OutputRouter::new(),
            sink: None,
            ui,
            style,
            configured_path: config.sardine.path.clone(),
            status_active: false,
        };
        (session, events_rx)
    }

    pub fn is_running(&self) -> bool {
        self.supervisor.is_running()
    }

    pub fn pid(&self) -> Option<u32> {
        self.supervisor.pid()
    }

    /// Register a one-shot hook for interpreter stdout.
    pub fn register_output_hook(&mut self, prefix: impl Into<String>, handler: HookFn) {
        self.router.register_hook(prefix, handler);
    }

    /// Start the interpreter. Idempotent while running.
    pub async fn start(&mut self) -> Result<()> {
        if self.supervisor.is_running() {
            return Ok(());
        }
        // The sink must exist before the first output chunk can arrive.
        self.sink = Some(FeedbackSink::new(self.style, Arc::clone(&self.ui)));
        if let Err(e) = self.supervisor.start().await {
            self.sink = None;
            self.ui.notify_error(&e.to_string());
            return Err(e);
        }
        if !self.status_active {
            self.ui.set_status(STATUS_LABEL);
            self.status_active = true;
        }
        let where_from = self
            .configured_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("default path");
        self.ui
            .notify_info(&format!("Sardine has started with: {where_from}"));
        Ok(())
    }

    /// Expand selections to their blocks, dispatch them, collapse to
    /// cursors. Starts the interpreter first if needed.
    pub async fn send(&mut self, doc: &Document, selections: &mut [Selection]) -> Result<()> {
        self.start().await?;
        expand_to_context(doc, selections);
        self.dispatch_selections(doc, selections).await;
        Ok(())
    }

    /// Dispatch selections exactly as given: no context expansion and no
    /// auto-start. With no running interpreter each selection reports a
    /// not-running error.
    pub async fn send_selections(&mut self, doc: &Document, selections: &mut [Selection]) {
        self.dispatch_selections(doc, selections).await;
    }

    async fn dispatch_selections(&mut self, doc: &Document, selections: &mut [Selection]) {
        for selection in selections.iter() {
            let text = doc.text_in(selection);
            if let Some(sink) = &self.sink {
                sink.present(&format!("{ECHO_MARKER}{text}\n"));
            }
            if let Err(e) = self.supervisor.send(&text).await {
                warn!(error = %e, "failed to dispatch block");
                self.ui.notify_error(&e.to_string());
            }
        }
        collapse_to_cursors(selections);
    }

    /// Hush all playing patterns without stopping the process.
    pub async fn silence(&mut self) {
        self.send_literal("silence()").await;
    }

    /// Hard stop of the scheduler, keeping the process alive.
    pub async fn panic(&mut self) {
        self.send_literal("panic()").await;
    }

    async fn send_literal(&mut self, code: &str) {
        if let Err(e) = self.supervisor.send(code).await {
            self.ui.notify_error(&e.to_string());
        }
    }

    /// Ask the interpreter to terminate. The exit itself is reported via
    /// [`SessionEvent::Exited`].
    pub fn stop(&mut self) {
        self.supervisor.stop();
        self.release_status();
    }

    /// Route one supervisor event.
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Stdout(chunk) => self.route_chunk(OutputStream::Stdout, &chunk),
            SessionEvent::Stderr(chunk) => self.route_chunk(OutputStream::Stderr, &chunk),
            SessionEvent::Exited { code, generation } => {
                // A stale exit (superseded generation) must leave the live
                // process's sink and status untouched.
                if !self.supervisor.mark_exited(generation) {
                    debug!(generation, "stale exit event; keeping session surfaces");
                    return;
                }
                self.sink = None;
                match code {
                    Some(code) if code != 0 => {
                        self.ui
                            .notify_error(&format!("Sardine has exited: {code}."));
                    }
                    _ => self.ui.notify_info("Sardine has stopped."),
                }
                self.release_status();
            }
        }
    }

    fn route_chunk(&mut self, stream: OutputStream, chunk: &str) {
        if self.router.intercept(stream, chunk) {
            return;
        }
        match &self.sink {
            Some(sink) => sink.present(chunk),
            None => debug!(stream = ?stream, "dropping output with no active sink"),
        }
    }

    fn release_status(&mut self) {
        if self.status_active {
            self.ui.clear_status();
            self.status_active = false;
        }
    }
}
