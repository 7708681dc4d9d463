use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Invalid label path {path:?}: {reason}")]
    InvalidPath { path: PathBuf, reason: &'static str },

    #[error("Transform failed for {source_path:?}: {message}")]
    TransformFailure {
        source_path: PathBuf,
        message: String,
    },

    #[error("Print failed for {image_path:?}: {message}")]
    PrintFailure { image_path: PathBuf, message: String },

    #[error("Failed to remove {path:?}: {error}")]
    CleanupFailure {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    pub(crate) fn invalid_path(path: impl Into<PathBuf>, reason: &'static str) -> Self {
        LabelError::InvalidPath {
            path: path.into(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, LabelError>;
