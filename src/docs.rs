// src/docs.rs

//! Opens the Sardine documentation in the system browser.

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::info;

pub const DOCUMENTATION_URL: &str = "https://sardine.raphaelforment.fr/";

/// Launch the platform browser opener on [`DOCUMENTATION_URL`].
pub async fn open_documentation() -> Result<()> {
    info!(url = DOCUMENTATION_URL, "opening documentation");
    let status = if cfg!(target_os = "macos") {
        Command::new("open").arg(DOCUMENTATION_URL).status().await
    } else if cfg!(target_os = "windows") {
        Command::new("cmd")
            .args(["/C", "start", "", DOCUMENTATION_URL])
            .status()
            .await
    } else {
        Command::new("xdg-open").arg(DOCUMENTATION_URL).status().await
    }
    .context("failed to launch the browser opener")?;

    if !status.success() {
        bail!("browser opener exited with {status}");
    }
    Ok(())
}
