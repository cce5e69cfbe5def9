//! # Record Trait
//!
//! The `Record` trait is the contract every stored resource (a product, a line item, …)
//! implements to be managed by the generic [`RecordActor`](crate::RecordActor). Unlike a
//! generated-id store, records arrive with their identifier already assigned by the host
//! platform, and may belong to a parent record so that the store can answer
//! "all children of X" queries.
//!
//! # Provided Methods (Hooks)
//! - [`Record::parent`] defaults to `None` (top-level record).
//! - [`Record::on_insert`] and [`Record::on_delete`] default to `Ok(())`.
//!
//! Only [`Record::id`] and [`Record::apply`] have to be written by hand.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be managed by a `RecordActor`.
///
/// # Associated Types
/// `Patch` is the partial update understood by this record. A product record may accept a
/// new stock level, a line item may accept a new quantity; the compiler prevents sending one
/// to the other's store.
pub trait Record: Clone + Send + Sync + 'static {
    /// Unique identifier of the record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Identifier of the owning record. Use `()` for records without a parent.
    type Parent: PartialEq + Clone + Send + Sync + Debug;

    /// The partial update applied by [`Record::apply`].
    type Patch: Send + Sync + Debug;

    /// The error type for business-rule rejections raised by the hooks.
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// The parent this record is listed under, if any.
    fn parent(&self) -> Option<&Self::Parent> {
        None
    }

    /// Validates the record before it enters the store.
    fn on_insert(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a patch in place. A returned error leaves the stored record untouched.
    fn apply(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed.
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}
