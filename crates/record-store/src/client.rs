//! # Record Client
//!
//! The async, type-safe handle used to talk to a [`RecordActor`](crate::RecordActor).

use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::Record;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `RecordActor`.
///
/// Holds only the channel sender, so it is cheap to clone and share across tasks. Dropping
/// the last clone shuts the store down.
#[derive(Clone)]
pub struct RecordClient<T: Record> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Record> RecordClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn insert(&self, record: T) -> Result<T::Id, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Insert { record, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    /// Lists every record whose parent is `parent`, in insertion order.
    pub async fn list(&self, parent: T::Parent) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::List { parent, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn patch(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Patch {
                id,
                patch,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }
}
