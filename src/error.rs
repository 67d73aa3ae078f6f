//! Error types for symbolist-site.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for symbolist-site operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating the site content.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The README source could not be read.
    #[error("Failed to read source document {}: {source}", path.display())]
    SourceRead {
        /// Path of the source document
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A node type name that is not part of the markdown tree.
    #[error("Unknown node type: {0}")]
    UnknownNodeKind(String),

    /// Heading depth outside of 1-6.
    #[error("Invalid heading depth: {0} (expected 1-6)")]
    InvalidHeadingDepth(u8),

    /// Autolink behavior name that is not recognized.
    #[error("Unknown autolink behavior: {0}")]
    UnknownAutolinkBehavior(String),

    /// Error during rendering (JSON props).
    #[error("Rendering error: {0}")]
    Render(String),

    /// A background pipeline task failed to complete.
    #[error("Pipeline task failed: {0}")]
    Task(String),
}
