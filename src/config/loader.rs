// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::model::ConfigFile;

/// Load a configuration file from a given path.
///
/// The file must exist and parse; use [`load_or_default`] when the file is
/// optional.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {path:?}"))?;

    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {path:?}"))?;

    Ok(config)
}

/// Load the config if the file exists; otherwise return the defaults.
///
/// The bridge must work with zero configuration, so a missing file is not
/// an error. A file that exists but fails to parse still is.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = ?path, "no config file; using defaults");
        return Ok(ConfigFile::default());
    }
    load_from_path(path)
}

/// Default config path: `Sardine.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Sardine.toml")
}
