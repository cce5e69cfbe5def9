#![allow(dead_code)]

use async_trait::async_trait;
use line_item_panel::crm::{CrmSystem, InMemoryCrm};
use line_item_panel::error::ServiceError;
use line_item_panel::model::{LineItem, LineItemId, OpportunityId, Product, ProductId};
use line_item_panel::services::{IdentityService, LineItemDeleter, LineItemQuery, StockUpdater};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Platform with `p1` (stock 3) and line `a` ordering 5 of it on opportunity `opp`.
pub async fn seeded(profile: &str) -> CrmSystem {
    let system = CrmSystem::start(profile);
    system
        .crm
        .add_product(Product::new("p1", "Widget", 3.0))
        .await
        .expect("seed product");
    system
        .crm
        .add_line_item("a", "opp", "p1", 5.0, 12.0)
        .await
        .expect("seed line item");
    system
}

/// Counts calls to the mutating services before forwarding them.
pub struct Counting {
    pub inner: Arc<InMemoryCrm>,
    pub deletes: AtomicUsize,
    pub stock_updates: AtomicUsize,
}

impl Counting {
    pub fn new(inner: Arc<InMemoryCrm>) -> Self {
        Self {
            inner,
            deletes: AtomicUsize::new(0),
            stock_updates: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LineItemDeleter for Counting {
    async fn delete_line_item(&self, id: &LineItemId) -> Result<(), ServiceError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_line_item(id).await
    }
}

#[async_trait]
impl StockUpdater for Counting {
    async fn update_stock(&self, product: &ProductId, quantity: f64) -> Result<(), ServiceError> {
        self.stock_updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_stock(product, quantity).await
    }
}

/// Query that fails with a transport error while `down` is set.
pub struct Flaky {
    pub inner: Arc<InMemoryCrm>,
    pub down: AtomicBool,
}

impl Flaky {
    pub fn new(inner: Arc<InMemoryCrm>) -> Self {
        Self {
            inner,
            down: AtomicBool::new(false),
        }
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl LineItemQuery for Flaky {
    async fn fetch_line_items(
        &self,
        parent: &OpportunityId,
    ) -> Result<Vec<LineItem>, ServiceError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(ServiceError::Transport("connection reset".into()));
        }
        self.inner.fetch_line_items(parent).await
    }
}

pub struct NoIdentity;

#[async_trait]
impl IdentityService for NoIdentity {
    async fn current_user_profile_name(&self) -> Result<String, ServiceError> {
        Err(ServiceError::Transport("identity service unavailable".into()))
    }
}

/// Mutations that take a while and record how many ran at the same time.
pub struct Slow {
    pub inner: Arc<InMemoryCrm>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl Slow {
    pub fn new(inner: Arc<InMemoryCrm>) -> Self {
        Self {
            inner,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LineItemDeleter for Slow {
    async fn delete_line_item(&self, id: &LineItemId) -> Result<(), ServiceError> {
        self.enter().await;
        let result = self.inner.delete_line_item(id).await;
        self.leave();
        result
    }
}

#[async_trait]
impl StockUpdater for Slow {
    async fn update_stock(&self, product: &ProductId, quantity: f64) -> Result<(), ServiceError> {
        self.enter().await;
        let result = self.inner.update_stock(product, quantity).await;
        self.leave();
        result
    }
}

/// Delete that blocks until the test releases it.
pub struct Gated {
    pub inner: Arc<InMemoryCrm>,
    pub release: Notify,
}

impl Gated {
    pub fn new(inner: Arc<InMemoryCrm>) -> Self {
        Self {
            inner,
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl LineItemDeleter for Gated {
    async fn delete_line_item(&self, id: &LineItemId) -> Result<(), ServiceError> {
        self.release.notified().await;
        self.inner.delete_line_item(id).await
    }
}
