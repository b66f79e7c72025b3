// src/config/mod.rs

//! Configuration loading for sardine-bridge.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`), falling back to defaults
//!   when no file exists.

pub mod loader;
pub mod model;

pub use loader::{default_config_path, load_from_path, load_or_default};
pub use model::{ConfigFile, FeedbackSection, SardineSection};
