//! Error types for the schemadoc core library
//!
//! Only run-level failures live here. Individual malformed lines never
//! surface as errors; the parser records them in its [`ParseReport`]
//! instead.
//!
//! [`ParseReport`]: crate::model::ParseReport

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for schemadoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// Source or output file could not be read or written
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source text is empty or whitespace only
    #[error("Schema source {origin} is empty")]
    EmptyInput { origin: String },

    /// Source text contains no usable table block
    #[error("No table definitions found in {origin} (expected lines starting with 'TABLE:')")]
    NoTables { origin: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The viewer HTML has no embeddable schema data object
    #[error("Viewer data section not found: {message}")]
    ViewerMarker { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error tagged with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON error with a short description of the failed step
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Whether this error comes from the input source rather than from output
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyInput { .. } | Self::NoTables { .. })
    }
}
