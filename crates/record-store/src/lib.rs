//! # Record Store
//!
//! Actor-backed, in-memory storage for platform records.
//!
//! Each record type gets its own [`RecordActor`] running in a Tokio task. The actor owns the
//! records exclusively and processes requests one at a time; callers talk to it through a
//! cloneable [`RecordClient`]. There are no locks around record state: exclusive ownership
//! inside the task is the synchronisation.
//!
//! ## Layers
//!
//! 1. **Record** ([`Record`]) - identity, parent link, patch semantics and business-rule hooks.
//! 2. **Actor** ([`RecordActor`]) - the request loop.
//! 3. **Client** ([`RecordClient`]) - typed async API (`insert`, `get`, `list`, `patch`, `delete`).
//!
//! ```rust
//! use record_store::{Record, RecordActor};
//!
//! #[derive(Clone, Debug)]
//! struct Task { id: String, project: String, done: bool }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("task error")]
//! struct TaskError;
//!
//! impl Record for Task {
//!     type Id = String;
//!     type Parent = String;
//!     type Patch = bool;
//!     type Error = TaskError;
//!
//!     fn id(&self) -> &String { &self.id }
//!     fn parent(&self) -> Option<&String> { Some(&self.project) }
//!     fn apply(&mut self, done: bool) -> Result<(), TaskError> { self.done = done; Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, tasks) = RecordActor::<Task>::new(16);
//!     let handle = tokio::spawn(actor.run());
//!
//!     tasks.insert(Task { id: "t1".into(), project: "p".into(), done: false }).await.unwrap();
//!     tasks.patch("t1".into(), true).await.unwrap();
//!     assert!(tasks.list("p".into()).await.unwrap()[0].done);
//!
//!     drop(tasks); // closing the channel stops the actor
//!     handle.await.unwrap();
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers a real client's requests from scripted expectations; see the
//! [`mock`] module.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod tracing;

pub use actor::RecordActor;
pub use client::RecordClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use record::Record;
