//! Crate-level error type and `Result` alias for fatal failures.
//! Covers input loading, session acquisition, extension resolution, and the
//! output stream. Per-URL failures are not errors; see `types::AuditFailure`.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read file: {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No URLs found in {}.", path.display())]
    EmptyInput { path: PathBuf },

    #[error("Failed to start audit session: {0}")]
    Session(String),

    #[error("Failed to locate WAVE extension: {0}")]
    Extension(String),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn session<E: std::fmt::Display>(e: E) -> Self {
        Error::Session(e.to_string())
    }

    pub fn extension<E: std::fmt::Display>(e: E) -> Self {
        Error::Extension(e.to_string())
    }
}
