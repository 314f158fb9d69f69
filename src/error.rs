//! Error types shared by every catalog component.

use std::io;

use thiserror::Error;

/// Errors returned by catalog, queue, history and configuration operations
#[derive(Debug, Error)]
pub enum LibraryError {
    /// No catalog record carries the requested title
    #[error("book not found: {0}")]
    NotFound(String),

    /// A return was attempted while no request was pending
    #[error("no pending requests in the queue")]
    EmptyQueue,

    /// Every recorded action has already been reviewed
    #[error("no actions left to review")]
    EmptyLog,

    /// The catalog file could not be opened or read
    #[error("failed to load catalog from {origin}: {source}")]
    Load {
        /// Path or stream the catalog was read from
        origin: String,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// The catalog file could not be written
    #[error("failed to save catalog to {origin}: {source}")]
    Save {
        /// Path or stream the catalog was written to
        origin: String,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// The configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl LibraryError {
    /// Whether this is an expected empty-state condition rather than a failure.
    ///
    /// Callers report these as plain messages.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::EmptyQueue | Self::EmptyLog)
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
