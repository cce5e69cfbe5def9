//! # Panel Observability
//!
//! The panel reports each significant transition to one injected [`PanelObserver`], never
//! to a global logger. [`TracingObserver`] is the default and turns events into structured
//! `tracing` records. [`RecordingObserver`] keeps them for assertions.

use crate::error::PanelError;
use crate::model::{LineItemId, OpportunityId, ProductId};
use crate::roles::ActorRole;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Panel lifecycle states.
///
/// ```text
/// Idle ──▶ Loading ──▶ Ready ◀──┐ delete (patched in place)
///             ▲   └──▶ LoadError│
///             └── reload / stock update
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    Idle,
    Loading,
    Ready,
    LoadError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ResolveRole,
    Load,
    Delete,
    UpdateStock,
    RefreshCache,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    RoleResolved { role: ActorRole },
    StatusChanged { from: PanelStatus, to: PanelStatus },
    Loaded { parent: OpportunityId, count: usize },
    ItemDeleted { id: LineItemId, remaining: usize },
    StockUpdated { product: ProductId, quantity: f64 },
    OperationFailed { operation: Operation, error: PanelError },
    Stopped { parent: OpportunityId },
}

pub trait PanelObserver: Send + Sync {
    fn on_event(&self, event: &PanelEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PanelObserver for TracingObserver {
    fn on_event(&self, event: &PanelEvent) {
        match event {
            PanelEvent::RoleResolved { role } => info!(?role, "panel role resolved"),
            PanelEvent::StatusChanged { from, to } => info!(?from, ?to, "panel status changed"),
            PanelEvent::Loaded { parent, count } => debug!(%parent, count, "line items loaded"),
            PanelEvent::ItemDeleted { id, remaining } => info!(%id, remaining, "line item deleted"),
            PanelEvent::StockUpdated { product, quantity } => {
                info!(%product, quantity, "stock updated")
            }
            PanelEvent::OperationFailed { operation, error } => {
                warn!(?operation, error = %error, "panel operation failed")
            }
            PanelEvent::Stopped { parent } => info!(%parent, "panel stopped"),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PanelEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PanelEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Status transitions only, in order.
    pub fn transitions(&self) -> Vec<(PanelStatus, PanelStatus)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PanelEvent::StatusChanged { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }
}

impl PanelObserver for RecordingObserver {
    fn on_event(&self, event: &PanelEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
