// src/lib.rs

//! sardine-bridge: relay editor text to a Sardine live-coding interpreter.
//!
//! The bridge supervises a single interpreter process, sends selected code
//! blocks to its stdin, and streams its output back through a one-shot hook
//! table to a configurable feedback surface. The console frontend in this
//! crate is the reference host; the [`ui::EditorUi`] trait is the seam for
//! other hosts.

pub mod cli;
pub mod config;
pub mod docs;
pub mod edit;
pub mod errors;
pub mod locate;
pub mod logging;
pub mod relay;
pub mod types;
pub mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cli::{CliArgs, ConsoleCommand, ConsoleParser};
use crate::edit::{Document, Position, Selection};
use crate::relay::Session;
use crate::ui::ConsoleUi;

const HELP_TEXT: &str = "\
Console directives:
  :start            start the interpreter
  :stop             stop the interpreter
  :silence          hush all playing patterns
  :panic            hard-stop the scheduler
  :send FILE LINE   send the block around LINE of FILE
  :sendline FILE LINE  send exactly LINE of FILE (no expansion, no auto-start)
  :help             show this help
  :quit             exit the bridge

Any other lines buffer into a block; an empty line sends it.
Documentation: https://sardine.raphaelforment.fr/";

/// Run the console frontend until EOF, `:quit`, or Ctrl-C.
pub async fn run(args: CliArgs) -> Result<()> {
    let config = config::load_or_default(Path::new(&args.config))?;
    let style = args.feedback_style.unwrap_or(config.feedback.style);
    let ui = Arc::new(ConsoleUi::new());
    let (mut session, mut events_rx) = Session::new(&config, style, ui.clone());

    if args.start {
        // A failed eager start is already reported through the UI; the
        // console stays usable and a later send retries.
        let _ = session.start().await;
    }

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<ConsoleCommand>(16);
    spawn_console_reader(cmd_tx.clone());
    spawn_interrupt_watch(cmd_tx);

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else { break };
                if !handle_command(&mut session, ui.as_ref(), cmd).await? {
                    break;
                }
            }
            event = events_rx.recv() => {
                let Some(event) = event else { break };
                session.handle_event(event);
            }
        }
    }

    // Mirrors an editor deactivation hook: stop the interpreter with the
    // host.
    session.stop();
    Ok(())
}

async fn handle_command(
    session: &mut Session,
    ui: &ConsoleUi,
    cmd: ConsoleCommand,
) -> Result<bool> {
    use crate::ui::EditorUi;
    match cmd {
        ConsoleCommand::Start => {
            let _ = session.start().await;
        }
        ConsoleCommand::Stop => session.stop(),
        ConsoleCommand::Silence => session.silence().await,
        ConsoleCommand::Panic => session.panic().await,
        ConsoleCommand::Help => {
            ui.append_log(&format!("{HELP_TEXT}\n"));
            if let Err(e) = docs::open_documentation().await {
                warn!(error = %e, "could not open the documentation");
            }
        }
        ConsoleCommand::Quit => return Ok(false),
        ConsoleCommand::SendBlock(block) => {
            let doc = Document::from_text(&block);
            let mut selections = [full_selection(&doc)];
            let _ = session.send(&doc, &mut selections).await;
        }
        ConsoleCommand::SendAt { file, line } => {
            let Some((doc, target)) = load_target(ui, &file, line) else {
                return Ok(true);
            };
            let mut selections = [Selection::cursor(Position::new(target, 0))];
            let _ = session.send(&doc, &mut selections).await;
        }
        ConsoleCommand::SendLineAt { file, line } => {
            let Some((doc, target)) = load_target(ui, &file, line) else {
                return Ok(true);
            };
            let end = Position::new(target, doc.line(target).chars().count());
            let mut selections = [Selection::new(Position::new(target, 0), end)];
            session.send_selections(&doc, &mut selections).await;
        }
    }
    Ok(true)
}

fn load_target(ui: &ConsoleUi, file: &str, line: usize) -> Option<(Document, usize)> {
    use crate::ui::EditorUi;
    match Document::load(Path::new(file)) {
        Ok(doc) => {
            let last = doc.line_count().saturating_sub(1);
            let target = line.saturating_sub(1).min(last);
            Some((doc, target))
        }
        Err(e) => {
            warn!(file = %file, error = %e, "cannot load file to send");
            ui.notify_error(&format!("{e:#}"));
            None
        }
    }
}

fn full_selection(doc: &Document) -> Selection {
    if doc.line_count() == 0 {
        return Selection::cursor(Position::new(0, 0));
    }
    let last = doc.line_count() - 1;
    Selection::new(
        Position::new(0, 0),
        Position::new(last, doc.line(last).chars().count()),
    )
}

fn spawn_console_reader(cmd_tx: mpsc::Sender<ConsoleCommand>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut parser = ConsoleParser::new();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(cmd) = parser.feed(&line) {
                        if cmd_tx.send(cmd).await.is_err() {
                            return;
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "console input read failed");
                    break;
                }
            }
        }
        if let Some(cmd) = parser.flush() {
            let _ = cmd_tx.send(cmd).await;
        }
        let _ = cmd_tx.send(ConsoleCommand::Quit).await;
    });
}

fn spawn_interrupt_watch(cmd_tx: mpsc::Sender<ConsoleCommand>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received");
            let _ = cmd_tx.send(ConsoleCommand::Quit).await;
        }
    });
}
