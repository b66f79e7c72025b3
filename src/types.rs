// src/types.rs

use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// How interpreter feedback is presented to the user.
///
/// - `Log` (default): append one entry per output chunk to the persistent
///   log surface.
/// - `Notify`: raise one transient notification per chunk.
///
/// The style is read from config once at interpreter start and stays fixed
/// for the lifetime of that process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStyle {
    Log,
    Notify,
}

impl Default for FeedbackStyle {
    fn default() -> Self {
        FeedbackStyle::Log
    }
}

impl FromStr for FeedbackStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" => Ok(FeedbackStyle::Log),
            "notify" => Ok(FeedbackStyle::Notify),
            other => Err(format!(
                "invalid feedback style: {other} (expected \"log\" or \"notify\")"
            )),
        }
    }
}
