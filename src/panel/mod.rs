//! # Line-Item Panel
//!
//! One panel shows the line items of one opportunity, flags rows that order more than the
//! product has in stock, and lets the user delete a row or correct a product's stock.
//!
//! - [`PanelActor`] - the task that owns the panel state
//! - [`PanelClient`] - the handle a host UI drives it through
//! - [`PanelContext`] - injected services, sinks, observer and role table
//! - [`PanelView`] - render-ready snapshot

pub mod actor;
pub mod client;
pub mod context;
pub mod message;
pub mod view;

pub use actor::PanelActor;
pub use client::PanelClient;
pub use context::PanelContext;
pub use message::PanelRequest;
pub use view::PanelView;

use crate::error::PanelError;
use crate::model::OpportunityId;
use tokio::sync::{mpsc, watch};

/// Creates a panel for `parent` and its client. The panel does nothing until
/// [`PanelActor::run`] is spawned with a context.
pub fn new(parent: impl Into<OpportunityId>, buffer: usize) -> (PanelActor, PanelClient) {
    let (sender, receiver) = mpsc::channel(buffer);
    let (loading_tx, loading_rx) = watch::channel(false);
    let actor = PanelActor::new(parent.into(), receiver, loading_tx);
    (actor, PanelClient::new(sender, loading_rx))
}

/// Parses a stock level typed by the user. Surrounding whitespace is ignored; anything that
/// is not a finite number is rejected.
pub fn parse_quantity(input: &str) -> Result<f64, PanelError> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PanelError::InvalidInput(format!(
            "'{}' is not a valid quantity",
            input
        ))),
    }
}
