//! Error types for the choreography core

use thiserror::Error;

/// Errors raised by the choreography core
///
/// All of these are recovered locally by callers: a missing visual element
/// degrades the scene, it never halts interaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Referenced entity was never loaded (or its load failed)
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// Origin restore requested before any snapshot was captured
    #[error("no origin snapshot for entity: {0}")]
    SnapshotMissing(String),

    /// Fired trigger id has no registered choreography
    #[error("unregistered trigger: {0}")]
    UnregisteredTrigger(String),
}

/// Result type for choreography core operations
pub type Result<T> = std::result::Result<T, Error>;
