//! Application errors.
//!
//! Everything that can stop the bar. Configuration problems come from the core
//! crate unchanged; the rest is the display backend failing to write output.

use std::path::PathBuf;

use embar_common::error::ConfigError;

/// Fatal errors surfaced by `main`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad settings, fonts, colors or widget registration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing the PNG snapshot failed.
    #[error("failed to write snapshot {}: {reason}", path.display())]
    Snapshot { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
