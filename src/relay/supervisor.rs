// src/relay/supervisor.rs

//! Interpreter process supervisor.
//!
//! Owns the child process lifecycle: spawn, stdin relay, stdout/stderr
//! reader tasks, and exit monitoring. At most one interpreter process is
//! alive per supervisor; a start attempt that races an in-flight spawn
//! attaches to that spawn's outcome instead of launching a second process.

use std::process::Stdio;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::errors::{RelayError, Result};
use crate::locate::find_sardine;

const READ_BUFFER: usize = 4096;

/// Events emitted by the supervisor's background tasks.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Stdout(String),
    Stderr(String),
    Exited { code: Option<i32>, generation: u64 },
}

/// Spawn-time settings resolved from config.
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    /// Configured interpreter path, if any. Passed to the locator.
    pub sardine_path: Option<String>,
    /// Value for the `sclang` environment variable of the child. Defaults
    /// to `"sclang"`.
    pub sclang_path: Option<String>,
}

struct ProcessHandle {
    stdin: Arc<tokio::sync::Mutex<ChildStdin>>,
    pid: Option<u32>,
    generation: u64,
    kill: Option<oneshot::Sender<()>>,
}

enum State {
    Idle,
    /// A spawn is in flight; `done` resolves with its outcome.
    Starting {
        done: watch::Receiver<Option<Result<()>>>,
    },
    Running(ProcessHandle),
}

struct Inner {
    state: State,
    next_generation: u64,
}

enum StartPlan {
    AlreadyRunning,
    Attach(watch::Receiver<Option<Result<()>>>),
    Spawn(watch::Sender<Option<Result<()>>>),
}

/// Handle to the single interpreter process slot.
///
/// Cheap to clone; all clones share the same process state.
#[derive(Clone)]
pub struct Supervisor {
    inner: Arc<Mutex<Inner>>,
    options: SpawnOptions,
    events_tx: mpsc::Sender<SessionEvent>,
}

impl Supervisor {
    pub fn new(options: SpawnOptions, events_tx: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: State::Idle,
                next_generation: 0,
            })),
            options,
            events_tx,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.lock_inner().state, State::Running(_))
    }

    pub fn pid(&self) -> Option<u32> {
        match &self.lock_inner().state {
            State::Running(handle) => handle.pid,
            _ => None,
        }
    }

    /// Start the interpreter unless it is already running.
    ///
    /// Concurrent callers during a spawn share the same outcome; exactly
    /// one process is launched.
    pub async fn start(&self) -> Result<()> {
        let plan = {
            let mut inner = self.lock_inner();
            match &inner.state {
                State::Running(_) => StartPlan::AlreadyRunning,
                State::Starting { done } => StartPlan::Attach(done.clone()),
                State::Idle => {
                    let (tx, rx) = watch::channel(None);
                    inner.state = State::Starting { done: rx };
                    StartPlan::Spawn(tx)
                }
            }
        };

        match plan {
            StartPlan::AlreadyRunning => {
                debug!("start requested while already running");
                Ok(())
            }
            StartPlan::Attach(mut rx) => loop {
                if let Some(outcome) = rx.borrow_and_update().clone() {
                    return outcome;
                }
                if rx.changed().await.is_err() {
                    return Err(RelayError::SpawnFailed("start was abandoned".into()));
                }
            },
            StartPlan::Spawn(tx) => {
                let outcome = self.spawn_and_attach().await;
                if outcome.is_err() {
                    self.lock_inner().state = State::Idle;
                }
                // Attached waiters observe the same outcome.
                let _ = tx.send(Some(outcome.clone()));
                outcome
            }
        }
    }

    /// Write `text` followed by the submission terminator to stdin.
    ///
    /// The terminator is exactly one blank line, which is what makes the
    /// interpreter evaluate the buffered block.
    pub async fn send(&self, text: &str) -> Result<()> {
        let stdin = match &self.lock_inner().state {
            State::Running(handle) => Arc::clone(&handle.stdin),
            _ => return Err(RelayError::ProcessNotRunning),
        };
        let mut stdin = stdin.lock().await;
        let io = async {
            stdin.write_all(text.as_bytes()).await?;
            stdin.write_all(b"\n\n").await?;
            stdin.flush().await
        };
        io.await.map_err(|e| RelayError::SendFailed(e.to_string()))
    }

    /// Request termination of the running process.
    ///
    /// No-op when idle or still starting; the exit is reported through a
    /// later [`SessionEvent::Exited`].
    pub fn stop(&self) {
        let kill = match &mut self.lock_inner().state {
            State::Running(handle) => handle.kill.take(),
            _ => None,
        };
        match kill {
            Some(tx) => {
                let _ = tx.send(());
            }
            None => debug!("stop requested with no running process"),
        }
    }

    /// Clear the running state after an exit event, if the event belongs
    /// to the process currently held.
    ///
    /// Returns true only when the current process was cleared; a stale
    /// event (superseded generation, or no process at all) returns false
    /// and callers must not tear anything down for it.
    pub fn mark_exited(&self, generation: u64) -> bool {
        let mut inner = self.lock_inner();
        match &inner.state {
            State::Running(handle) if handle.generation == generation => {
                inner.state = State::Idle;
                true
            }
            State::Running(_) => {
                debug!(generation, "ignoring exit of a superseded process");
                false
            }
            _ => false,
        }
    }

    async fn spawn_and_attach(&self) -> Result<()> {
        let path = find_sardine(self.options.sardine_path.as_deref()).await?;

        let sclang = self
            .options
            .sclang_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("sclang");
        let mut command = Command::new(&path);
        command
            .env("PYTHONIOENCODING", "utf-8")
            .env("sclang", sclang)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command
            .spawn()
            .map_err(|e| RelayError::SpawnFailed(format!("{path}: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| RelayError::SpawnFailed("child stdin was not captured".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| RelayError::SpawnFailed("child stdout was not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| RelayError::SpawnFailed("child stderr was not captured".into()))?;

        let pid = child.id();
        let generation = {
            let mut inner = self.lock_inner();
            let generation = inner.next_generation;
            inner.next_generation += 1;
            generation
        };
        info!(path = %path, pid = ?pid, "sardine started");

        spawn_chunk_reader(stdout, self.events_tx.clone(), SessionEvent::Stdout);
        spawn_chunk_reader(stderr, self.events_tx.clone(), SessionEvent::Stderr);

        let (kill_tx, kill_rx) = oneshot::channel();
        spawn_exit_monitor(child, generation, kill_rx, self.events_tx.clone());

        self.lock_inner().state = State::Running(ProcessHandle {
            stdin: Arc::new(tokio::sync::Mutex::new(stdin)),
            pid,
            generation,
            kill: Some(kill_tx),
        });
        Ok(())
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn spawn_chunk_reader<R>(
    mut reader: R,
    events_tx: mpsc::Sender<SessionEvent>,
    wrap: fn(String) -> SessionEvent,
) where
    R: AsyncReadExt + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = [0u8; READ_BUFFER];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                    if events_tx.send(wrap(chunk)).await.is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "interpreter output read failed");
                    break;
                }
            }
        }
    });
}

fn spawn_exit_monitor(
    mut child: Child,
    generation: u64,
    kill_rx: oneshot::Receiver<()>,
    events_tx: mpsc::Sender<SessionEvent>,
) {
    tokio::spawn(async move {
        let status = tokio::select! {
            status = child.wait() => status,
            _ = kill_rx => {
                debug!("stopping sardine on request");
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "failed to kill sardine");
                }
                child.wait().await
            }
        };
        let code = match status {
            Ok(status) => status.code(),
            Err(e) => {
                warn!(error = %e, "waiting on sardine failed");
                None
            }
        };
        info!(code = ?code, "sardine exited");
        let _ = events_tx
            .send(SessionEvent::Exited { code, generation })
            .await;
    });
}
