// src/cli.rs

//! CLI argument parsing using `clap`, plus the console directive language
//! used by the interactive frontend.
//!
//! The console is the reference "editor host": plain lines accumulate into
//! a block, an empty line dispatches the block as one selection, and
//! `:`-prefixed directives map one-to-one to host commands.

use clap::{Parser, ValueEnum};
use tracing::warn;

use crate::types::FeedbackStyle;

/// Command-line arguments for `sardine-bridge`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sardine-bridge",
    version,
    about = "Relay editor text to a Sardine interpreter and stream its feedback back.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Sardine.toml` in the current working directory. A missing
    /// file is fine; the defaults apply.
    #[arg(long, value_name = "PATH", default_value = "Sardine.toml")]
    pub config: String,

    /// Spawn the interpreter immediately instead of on first send.
    #[arg(long)]
    pub start: bool,

    /// Override the configured feedback style (log, notify).
    #[arg(long, value_enum, value_name = "STYLE")]
    pub feedback_style: Option<FeedbackStyle>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SARDINE_BRIDGE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// One host command produced by the console frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Stop,
    Silence,
    Panic,
    Help,
    Quit,
    /// Dispatch a buffered block of code as a single selection.
    SendBlock(String),
    /// Load `file` and send the non-blank block around `line` (1-based).
    SendAt { file: String, line: usize },
    /// Load `file` and send exactly `line` (1-based), with no context
    /// expansion and no auto-start.
    SendLineAt { file: String, line: usize },
}

/// Incremental parser turning console input lines into commands.
///
/// Non-directive lines accumulate into a block; an empty line flushes the
/// block as [`ConsoleCommand::SendBlock`]. Trailing whitespace is trimmed,
/// leading whitespace is kept (it is code).
#[derive(Debug, Default)]
pub struct ConsoleParser {
    buffer: Vec<String>,
}

impl ConsoleParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one input line; returns a command when one is complete.
    pub fn feed(&mut self, line: &str) -> Option<ConsoleCommand> {
        let line = line.trim_end();
        if let Some(rest) = line.strip_prefix(':') {
            return parse_directive(rest);
        }
        if line.trim().is_empty() {
            return self.flush();
        }
        self.buffer.push(line.to_string());
        None
    }

    /// Flush any pending block (also used on EOF).
    pub fn flush(&mut self) -> Option<ConsoleCommand> {
        if self.buffer.is_empty() {
            return None;
        }
        let block = self.buffer.join("\n");
        self.buffer.clear();
        Some(ConsoleCommand::SendBlock(block))
    }
}

fn parse_directive(rest: &str) -> Option<ConsoleCommand> {
    let mut parts = rest.split_whitespace();
    match parts.next() {
        Some("start") => Some(ConsoleCommand::Start),
        Some("stop") => Some(ConsoleCommand::Stop),
        Some("silence") => Some(ConsoleCommand::Silence),
        Some("panic") => Some(ConsoleCommand::Panic),
        Some("help") => Some(ConsoleCommand::Help),
        Some("quit") | Some("q") => Some(ConsoleCommand::Quit),
        Some(verb @ ("send" | "sendline")) => {
            let file = parts.next();
            let line = parts.next().and_then(|s| s.parse::<usize>().ok());
            match (file, line) {
                (Some(file), Some(line)) => {
                    let file = file.to_string();
                    Some(if verb == "send" {
                        ConsoleCommand::SendAt { file, line }
                    } else {
                        ConsoleCommand::SendLineAt { file, line }
                    })
                }
                _ => {
                    warn!(directive = rest, "usage: :{verb} FILE LINE");
                    None
                }
            }
        }
        _ => {
            warn!(directive = rest, "unknown console directive");
            None
        }
    }
}
