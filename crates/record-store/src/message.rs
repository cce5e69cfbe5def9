//! # Store Messages
//!
//! Request types exchanged between a [`RecordClient`](crate::RecordClient) and its
//! [`RecordActor`](crate::RecordActor).

use crate::error::StoreError;
use crate::record::Record;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Message sent to the store actor.
///
/// The variants cover the lifecycle of a platform record: it is inserted with its id,
/// read alone or listed under its parent, patched, and finally deleted.
#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Insert {
        record: T,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        parent: T::Parent,
        respond_to: Response<Vec<T>>,
    },
    Patch {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
