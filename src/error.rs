//! Error types for the gallery core and the export pipeline

use thiserror::Error;

/// Result type alias for gallery and export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the gallery core
#[derive(Error, Debug)]
pub enum Error {
    /// The lightbox was asked to open on an empty filtered view
    #[error("Cannot open the lightbox on an empty view")]
    EmptyView,

    /// The lightbox was asked to open past the end of the filtered view
    #[error("Index {index} is out of range for a view of {len} images")]
    IndexOutOfRange { index: usize, len: usize },

    /// The catalog is malformed
    #[error("Invalid catalog: {0}")]
    CatalogError(String),

    /// Failed to fetch an image resource
    #[error("Failed to load image: {0}")]
    LoadError(String),

    /// Fetched bytes could not be decoded as an image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Failed to assemble the output document
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error while reading a catalog or saving a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::CatalogError(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::DecodeError(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::LoadError(err.to_string())
    }
}
