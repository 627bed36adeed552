// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiftError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("failed to parse source file: {path}")]
    Parse { path: PathBuf },

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("candidates must not be empty")]
    EmptyCandidates,

    #[error("metric vector is empty; at least one metric scorer must be configured")]
    EmptyMetrics,

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SiftError>;

// Allow `?` on std::io::Error by converting to SiftError::Io with unknown path.
impl From<std::io::Error> for SiftError {
    fn from(source: std::io::Error) -> Self {
        SiftError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl SiftError {
    /// Attaches a concrete path to a bare I/O error.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        SiftError::Io {
            source,
            path: path.into(),
        }
    }
}
