//! Error types for staging and serving.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T, E = StageError> = std::result::Result<T, E>;

/// Failures of the staging and bundle steps. Any of them aborts the run.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk project tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Staging path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    BundleFailed { program: String, status: ExitStatus },
}

/// Failures while setting up the development server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid header name '{0}'")]
    InvalidHeaderName(String),

    #[error("Invalid value for header '{0}'")]
    InvalidHeaderValue(String),

    #[error("Document root not found: {}", .0.display())]
    RootNotFound(PathBuf),
}

/// Attach a path to I/O errors
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| StageError::Io {
            path: path.into(),
            source,
        })
    }
}
