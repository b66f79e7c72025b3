// src/config/model.rs

use serde::Deserialize;

use crate::types::FeedbackStyle;

/// Top-level configuration as read from a TOML file.
///
/// This maps a `Sardine.toml` like:
///
/// ```toml
/// [sardine]
/// path = "/opt/sardine/bin"
/// sclang_path = "/usr/local/bin/sclang"
///
/// [feedback]
/// style = "log"
/// ```
///
/// All sections are optional; an absent file is equivalent to the defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Interpreter location and environment from `[sardine]`.
    #[serde(default)]
    pub sardine: SardineSection,

    /// Output presentation from `[feedback]`.
    #[serde(default)]
    pub feedback: FeedbackSection,
}

/// `[sardine]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SardineSection {
    /// Directory containing the `sardine` executable, or the full path to
    /// it. When set it wins over the PATH lookup, with no existence check.
    #[serde(default)]
    pub path: Option<String>,

    /// Path to the SuperCollider `sclang` binary, exported to the
    /// interpreter's environment. Defaults to `"sclang"`.
    #[serde(default)]
    pub sclang_path: Option<String>,
}

/// `[feedback]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeedbackSection {
    /// Presentation style for interpreter output.
    #[serde(default)]
    pub style: FeedbackStyle,
}
