//! Error types for the panel and the services it consumes.

use thiserror::Error;

/// Failures reported by a platform collaborator (query, delete, stock update, identity).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// The service could not be reached or failed internally.
    #[error("Service unavailable: {0}")]
    Transport(String),

    /// The referenced record does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The service refused the operation on business-rule grounds.
    #[error("Rejected by platform: {0}")]
    Rejected(String),
}

/// Errors surfaced by the panel to its callers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PanelError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Local validation failed; nothing was sent to the platform.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The panel task is no longer running.
    #[error("Panel closed")]
    PanelClosed,

    #[error("Panel dropped response channel")]
    PanelDropped,
}

impl From<ServiceError> for PanelError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Transport(msg) => PanelError::Transport(msg),
            ServiceError::NotFound(msg) => PanelError::NotFound(msg),
            ServiceError::Rejected(msg) => PanelError::Persistence(msg),
        }
    }
}

impl PanelError {
    /// Stock-update failures all surface as persistence errors, whatever the service reported.
    pub fn persistence(e: ServiceError) -> Self {
        match e {
            ServiceError::Transport(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Rejected(msg) => PanelError::Persistence(msg),
        }
    }
}
