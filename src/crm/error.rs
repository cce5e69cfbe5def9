//! Error types for the in-memory platform.

use crate::error::ServiceError;
use record_store::StoreError;
use thiserror::Error;

/// Business rules enforced by the platform's records.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CrmError {
    /// Stock levels must be finite and non-negative.
    #[error("Invalid stock level: {0}")]
    InvalidStock(f64),

    /// Ordered quantities must be finite and non-negative.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),

    /// A line item must reference an existing product.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::StoreClosed | StoreError::StoreDropped => {
                ServiceError::Transport(e.to_string())
            }
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            StoreError::AlreadyExists(id) => {
                ServiceError::Rejected(format!("duplicate record {id}"))
            }
            StoreError::Rejected(reason) => ServiceError::Rejected(reason.to_string()),
        }
    }
}

impl From<CrmError> for ServiceError {
    fn from(e: CrmError) -> Self {
        ServiceError::Rejected(e.to_string())
    }
}
