// src/locate.rs

//! Executable locator for the Sardine interpreter.
//!
//! Resolution order:
//! 1. A configured path wins unconditionally (no existence check). It is
//!    normalised by appending `/sardine` unless already present, so both a
//!    directory and a full executable path are accepted.
//! 2. On POSIX-like platforms, `which sardine` on the inherited PATH.
//! 3. Otherwise the interpreter is reported as not found; callers treat
//!    absence as a hard stop, not something to retry.
//!
//! There is no caching: every call re-resolves.

use tracing::debug;

use crate::errors::{RelayError, Result};

const SARDINE_SUFFIX: &str = "/sardine";

/// Append `/sardine` to a configured path unless it already ends with it.
pub fn append_sardine_path(path: &str) -> String {
    if path.ends_with(SARDINE_SUFFIX) {
        path.to_string()
    } else {
        format!("{path}{SARDINE_SUFFIX}")
    }
}

/// Resolve the interpreter executable.
pub async fn find_sardine(configured: Option<&str>) -> Result<String> {
    if let Some(path) = configured.filter(|p| !p.is_empty()) {
        let resolved = append_sardine_path(path);
        debug!(path = %resolved, "using configured sardine path");
        return Ok(resolved);
    }

    if cfg!(unix) {
        match tokio::process::Command::new("which")
            .arg("sardine")
            .output()
            .await
        {
            Ok(out) if out.status.success() => {
                let found = String::from_utf8_lossy(&out.stdout).trim().to_string();
                if !found.is_empty() {
                    debug!(path = %found, "found sardine on PATH");
                    return Ok(found);
                }
            }
            Ok(out) => {
                debug!(status = ?out.status.code(), "`which sardine` found nothing");
            }
            Err(e) => {
                debug!(error = %e, "`which` lookup failed");
            }
        }
    }

    Err(RelayError::ExecutableNotFound)
}
