// src/relay/ansi.rs

//! ANSI escape sequence stripping for interpreter output.
//!
//! The grammar covers the two forms the interpreter emits:
//! - ESC/CSI-introduced sequences with optional parameter lists terminated
//!   by BEL (operating-system command style), and
//! - sequences with numeric parameter lists terminated by a single
//!   character from the fixed terminator set.
//!
//! Stripping is global (every occurrence, including back-to-back
//! sequences) and idempotent on well-formed sequences.

use std::sync::OnceLock;

use regex::Regex;

const ANSI_PATTERN: &str = concat!(
    "[\u{1b}\u{9b}][\\[\\]()#;?]*",
    "(?:",
    "(?:(?:(?:;[-a-zA-Z\\d/#&.:=?%@~_]+)*|[a-zA-Z\\d]+(?:;[-a-zA-Z\\d/#&.:=?%@~_]*)*)?\u{7})",
    "|",
    "(?:(?:\\d{1,4}(?:;\\d{0,4})*)?[\\dA-PR-TZcf-nq-uy=><~])",
    ")",
);

fn ansi_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ANSI_PATTERN).expect("ANSI pattern is a valid regex"))
}

/// Remove all ANSI escape sequences from `input`.
///
/// Text without escape sequences passes through unchanged.
pub fn strip_ansi(input: &str) -> String {
    ansi_regex().replace_all(input, "").into_owned()
}
