use std::path::PathBuf;

use pixelsmith_core::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Unsupported file extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Invalid size {0:?}, expected WIDTHxHEIGHT")]
    InvalidSize(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Task(e.to_string())
    }
}
