//! # Store Errors
//!
//! Common error type returned by every [`RecordClient`](crate::RecordClient) call.

/// Errors that can occur within the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Record already exists: {0}")]
    AlreadyExists(String),
    #[error("Record rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}
