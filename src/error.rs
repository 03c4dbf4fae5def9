//! Error types for loading and transforming LRC content.

use std::path::PathBuf;

use thiserror::Error;

/// Library result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Empty path argument or empty source content.
    #[error("failed to initialize LRC transformer: {0}")]
    Init(String),

    /// Reading or writing a file failed.
    #[error("IO error at {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    /// Source bytes are not UTF-8.
    #[error("LRC content at {path:?} is not valid UTF-8")]
    Encoding { path: Option<PathBuf> },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: Some(path.into()),
        }
    }
}

/// A single timestamp token that could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed timestamp: '{0}'")]
    MalformedTimestamp(String),

    #[error("{field} out of range: {value} > {max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
}
