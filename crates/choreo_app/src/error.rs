//! Error types for choreo_app

use thiserror::Error;

/// Errors that can occur while assembling or running the viewer
///
/// Only startup failures are fatal; everything that happens after the
/// scene is up (missing entities, failed loads, stray triggers) is
/// recovered and logged by the core.
#[derive(Error, Debug)]
pub enum AppError {
    /// Scene configuration could not be read or parsed
    #[error("scene config error: {0}")]
    Config(String),

    /// Render host failed to initialize; nothing can be shown
    #[error("render host initialization failed: {0}")]
    HostInit(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

/// Result type for choreo_app operations
pub type Result<T> = std::result::Result<T, AppError>;
