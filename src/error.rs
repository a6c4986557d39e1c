//! Error types for analysis and export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the caller of the analysis and export functions.
///
/// Empty input is never an error: it produces an empty `Analysis`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot export an empty bitmap")]
    EmptyImage,

    #[error("bitmap of {width}x{height} pixels exceeds image dimension limits")]
    ImageTooLarge { width: usize, height: usize },

    #[error("failed to export image to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("analysis cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
