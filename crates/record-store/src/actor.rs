//! # Record Store Actor
//!
//! This module defines the `RecordActor`, the component that owns the records of one type
//! and processes requests against them sequentially.

use crate::client::RecordClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::Record;
use indexmap::IndexMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns a collection of records.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the records and the receiver end
/// of the channel; each instance runs in its own Tokio task and handles one request at a
/// time, so the map needs no `Mutex`.
///
/// Records keep their insertion order, which makes `List` results deterministic.
///
/// # Usage Pattern
///
/// ```rust
/// use record_store::{Record, RecordActor};
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32, text: String }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("empty note")]
/// struct NoteError;
///
/// impl Record for Note {
///     type Id = u32;
///     type Parent = ();
///     type Patch = String;
///     type Error = NoteError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn apply(&mut self, text: String) -> Result<(), NoteError> {
///         if text.is_empty() { return Err(NoteError); }
///         self.text = text;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = RecordActor::<Note>::new(10);
///     tokio::spawn(actor.run());
///
///     client.insert(Note { id: 1, text: "hello".into() }).await.unwrap();
///     let note = client.patch(1, "bye".into()).await.unwrap();
///     assert_eq!(note.text, "bye");
/// }
/// ```
///
/// ## Operations
///
/// * **Insert**: runs `on_insert`, rejects a duplicate id with `AlreadyExists`.
/// * **Get**: clone of the record, or `None`.
/// * **List**: clones of every record whose `parent()` equals the requested parent.
/// * **Patch**: applies the patch to a scratch copy and commits it only if `apply` succeeds.
/// * **Delete**: runs `on_delete`, then removes the record; unknown ids fail with `NotFound`.
pub struct RecordActor<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: IndexMap<T::Id, T>,
}

impl<T: Record> RecordActor<T> {
    /// Creates a new `RecordActor` and its associated `RecordClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, RecordClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: IndexMap::new(),
        };
        (actor, RecordClient::new(sender))
    }

    /// Runs the store's event loop until every client has been dropped.
    pub async fn run(mut self) {
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { record, respond_to } => {
                    let id = record.id().clone();
                    debug!(record_type, %id, "Insert");
                    if self.records.contains_key(&id) {
                        warn!(record_type, %id, "Already exists");
                        let _ = respond_to.send(Err(StoreError::AlreadyExists(id.to_string())));
                        continue;
                    }
                    if let Err(e) = record.on_insert() {
                        warn!(record_type, %id, error = %e, "on_insert failed");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }
                    self.records.insert(id.clone(), record);
                    info!(record_type, %id, size = self.records.len(), "Inserted");
                    let _ = respond_to.send(Ok(id));
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.records.get(&id).cloned();
                    debug!(record_type, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::List { parent, respond_to } => {
                    let children: Vec<T> = self
                        .records
                        .values()
                        .filter(|r| r.parent() == Some(&parent))
                        .cloned()
                        .collect();
                    debug!(record_type, ?parent, count = children.len(), "List");
                    let _ = respond_to.send(Ok(children));
                }
                StoreRequest::Patch {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?patch, "Patch");
                    let Some(current) = self.records.get(&id) else {
                        warn!(record_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut updated = current.clone();
                    match updated.apply(patch) {
                        Ok(()) => {
                            self.records.insert(id.clone(), updated.clone());
                            info!(record_type, %id, "Patched");
                            let _ = respond_to.send(Ok(updated));
                        }
                        Err(e) => {
                            warn!(record_type, %id, error = %e, "Patch rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(record_type, %id, "Delete");
                    let Some(record) = self.records.get(&id) else {
                        warn!(record_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = record.on_delete() {
                        warn!(record_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }
                    self.records.shift_remove(&id);
                    info!(record_type, %id, size = self.records.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(record_type, size = self.records.len(), "Shutdown");
    }
}
