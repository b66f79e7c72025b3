// src/errors.rs

//! Crate-wide error types.
//!
//! [`RelayError`] covers the conditions the bridge recovers from locally and
//! surfaces as user-visible notifications; none of them are fatal to the
//! host. The enum is `Clone` because the outcome of an in-flight start is
//! broadcast to every caller attached to it.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("sardine executable not found; set `sardine.path` in the config")]
    ExecutableNotFound,

    #[error("failed to spawn sardine: {0}")]
    SpawnFailed(String),

    #[error("sardine is not running")]
    ProcessNotRunning,

    #[error("failed to write to sardine: {0}")]
    SendFailed(String),
}

pub type Result<T> = std::result::Result<T, RelayError>;
