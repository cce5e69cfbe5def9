//! # Mock Store & Testing Guide
//!
//! `MockStore<T>` hands out a real [`RecordClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running [`RecordActor`](crate::RecordActor).
//! Use it to test code that sits *on top of* a store (adapters, services) without seeding
//! real records, and to inject failures that are awkward to reproduce against the real
//! actor (a closed store, a rejected patch).
//!
//! | Feature | MockStore | Real store |
//! |---------|-----------|------------|
//! | **State** | None (expectations) | Real records |
//! | **Determinism** | Fully scripted | Subject to scheduler |
//! | **Error injection** | `return_err` | Needs crafted records |
//!
//! ```rust
//! use record_store::mock::MockStore;
//! use record_store::{Record, StoreError};
//!
//! #[derive(Clone, Debug)]
//! struct Note { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct NoteError;
//!
//! impl Record for Note {
//!     type Id = u32; type Parent = (); type Patch = (); type Error = NoteError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn apply(&mut self, _: ()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Note>::new();
//!     mock.expect_get(1).return_ok(Some(Note { id: 1 }));
//!     mock.expect_delete(2).return_err(StoreError::NotFound("2".into()));
//!
//!     let client = mock.client();
//!     assert!(client.get(1).await.unwrap().is_some());
//!     assert!(matches!(client.delete(2).await, Err(StoreError::NotFound(_))));
//!
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are consumed in the order they were declared. A request that does not match
//! the next expectation (wrong operation or wrong id) panics the mock task, which drops the
//! response channel and surfaces as [`StoreError::StoreDropped`] on the caller's side.
//!
//! For lower-level control, [`create_mock_client`] returns the raw request receiver so a test
//! can inspect each message and answer it by hand.

use crate::client::RecordClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: Record> {
    Insert {
        response: Result<T::Id, StoreError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Patch {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store with expectation tracking.
pub struct MockStore<T: Record> {
    client: RecordClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockStore<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();

                match (request, next) {
                    (
                        StoreRequest::Insert { respond_to, .. },
                        Some(Expectation::Insert { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Patch { id, respond_to, .. },
                        Some(Expectation::Patch { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "patch called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: RecordClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> RecordClient<T> {
        self.client.clone()
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Insert { response }
        })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Get { id, response }
        })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::List { response }
        })
    }

    pub fn expect_patch(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Patch { id, response }
        })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Delete { id, response }
        })
    }

    /// Panics if any declared expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder returned by the `expect_*` methods; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<T: Record, R> {
    expectations: Queue<T>,
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Queue<T>,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            make: Box::new(make),
        }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (RecordClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RecordClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a `Patch`.
pub async fn expect_patch<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Patch, oneshot::Sender<Result<T, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Patch {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `List`.
pub async fn expect_list<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Parent, oneshot::Sender<Result<Vec<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::List { parent, respond_to }) => Some((parent, respond_to)),
        _ => None,
    }
}
