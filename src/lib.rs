//! # Line-Item Panel
//!
//! > **The line-item list of an opportunity page, as an actor.**
//!
//! A panel loads the line items attached to one opportunity, marks every row that orders
//! more than its product has in stock, and lets the user delete a row or correct a product's
//! stock level. All data lives on an external record platform reached through injected
//! service traits.
//!
//! ## Architecture Notes
//!
//! ### 1. One Mutation at a Time
//! Each panel is a Tokio task fed by a bounded channel. Requests are processed sequentially,
//! so a second delete or stock update waits for the first instead of racing it. The loading
//! flag is published on a `watch` channel for renderers.
//!
//! ### 2. Context Injection
//! Services, sinks, the observer and the role table travel in a [`PanelContext`] handed to
//! `run()`, not to the constructor.
//!
//! ### 3. Errors
//! Collaborators report [`ServiceError`]; the panel translates it to [`PanelError`], records
//! it as `last_error`, notifies the user, and returns it to the caller.
//!
//! ### 4. Observability
//! The panel emits one [`PanelEvent`](observe::PanelEvent) per state transition to an
//! injected [`PanelObserver`](observe::PanelObserver). The default observer writes `tracing`
//! events; the binary installs a subscriber through `record_store::tracing::setup_tracing`.
//!
//! ## Module Tour
//!
//! - [`model`] - line items and products
//! - [`reconcile`] - over-stock annotation
//! - [`roles`] - profile name to role, role to actions
//! - [`services`] - collaborator contracts and sinks
//! - [`cache`] - memoizing query service with refresh hook
//! - [`crm`] - in-memory platform on top of `record-store`
//! - [`panel`] - the actor, its client and snapshot view
//! - [`lifecycle`] - mount and unmount a panel
//! - [`config`] - role table and channel sizing
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod cache;
pub mod config;
pub mod crm;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod observe;
pub mod panel;
pub mod reconcile;
pub mod roles;
pub mod services;

pub use error::{PanelError, ServiceError};
pub use lifecycle::PanelSystem;
pub use panel::{PanelClient, PanelContext, PanelView};
