// src/relay/router.rs

//! Output routing: one-shot prefix hooks with sink fallthrough.
//!
//! Incoming chunks are arbitrary fragments of the interpreter's output, not
//! aligned to lines or messages. Each chunk goes to exactly one consumer:
//! the first registered hook whose literal prefix matches, or the feedback
//! sink. A hook fires at most once and is removed when it does. There is no
//! buffering across chunks; multi-chunk messages are not reassembled.

use std::fmt;

use tracing::debug;

/// A one-shot handler invoked with the chunk minus its matched prefix.
pub type HookFn = Box<dyn FnOnce(&str) + Send>;

/// Which process stream a chunk arrived on.
///
/// Hooks intercept `Stdout` only; `Stderr` chunks always fall through to
/// the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Ordered table of (literal prefix, one-shot handler) pairs.
#[derive(Default)]
pub struct OutputRouter {
    hooks: Vec<(String, HookFn)>,
}

impl fmt::Debug for OutputRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputRouter")
            .field("pending_hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

impl OutputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a one-shot hook for stdout chunks starting with `prefix`.
    ///
    /// Hooks are checked in registration order; the first match wins.
    pub fn register_hook(&mut self, prefix: impl Into<String>, handler: HookFn) {
        self.hooks.push((prefix.into(), handler));
    }

    /// Number of registered hooks that have not fired yet.
    pub fn pending_hooks(&self) -> usize {
        self.hooks.len()
    }

    /// Try to intercept `chunk` with a registered hook.
    ///
    /// Returns true if a hook fired (consuming its table entry). A false
    /// return means the caller must forward the full chunk to the sink.
    pub fn intercept(&mut self, stream: OutputStream, chunk: &str) -> bool {
        if stream == OutputStream::Stderr {
            return false;
        }
        let Some(idx) = self
            .hooks
            .iter()
            .position(|(prefix, _)| chunk.starts_with(prefix.as_str()))
        else {
            return false;
        };
        let (prefix, handler) = self.hooks.remove(idx);
        debug!(prefix = %prefix, "output hook fired");
        handler(&chunk[prefix.len()..]);
        true
    }
}
