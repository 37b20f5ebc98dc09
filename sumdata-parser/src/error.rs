//! Error types shared by the dataset tools

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while reading corpora or writing dataset files
#[derive(Debug)]
pub enum Error {
    /// IO error, with the path involved when one is known
    Io {
        path: Option<PathBuf>,
        source: io::Error,
    },
    /// A projection or extraction mode name that is not recognized
    UnknownMode(String),
    /// The DUC layout did not match what the test-set builder expects
    Duc(String),
    /// The decoder command could not be built or did not succeed
    Sweep(String),
}

impl Error {
    /// Attach a path to an IO error
    pub fn io_at(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: Some(path.into()),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io {
                path: Some(path),
                source,
            } => write!(f, "IO error on {}: {}", path.display(), source),
            Error::Io { path: None, source } => write!(f, "IO error: {}", source),
            Error::UnknownMode(mode) => write!(f, "Unknown mode: {}", mode),
            Error::Duc(msg) => write!(f, "DUC layout error: {}", msg),
            Error::Sweep(msg) => write!(f, "Decoder sweep error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io {
            path: None,
            source: err,
        }
    }
}

/// Result alias for the dataset tools
pub type Result<T> = std::result::Result<T, Error>;
