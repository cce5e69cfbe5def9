//! # In-Memory Platform
//!
//! A reference implementation of the record platform the panel talks to, built on two
//! [`RecordActor`]s (products and line items). It serves the panel's data contracts:
//!
//! - [`LineItemQuery`]: lists an opportunity's lines and joins each with its product.
//!   An opportunity without lines is reported as `NotFound`.
//! - [`LineItemDeleter`]: removes one line.
//! - [`StockUpdater`]: sets a product's stock; negative or non-finite levels are rejected.
//! - [`IdentityService`]: returns the profile name the platform was started with.
//!
//! ## Structure
//!
//! - [`records`] - `Record` implementations for products and line items
//! - [`error`] - [`CrmError`] business rules, plus store → service error mapping
//! - [`CrmSystem`] - spawns the store actors and shuts them down
//!
//! ```rust
//! use line_item_panel::crm::CrmSystem;
//! use line_item_panel::model::{OpportunityId, Product};
//! use line_item_panel::services::LineItemQuery;
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = CrmSystem::start("Commercial");
//!     system.crm.add_product(Product::new("p1", "Widget", 3.0)).await.unwrap();
//!     system.crm.add_line_item("a", "opp", "p1", 5.0, 20.0).await.unwrap();
//!
//!     let items = system.crm.fetch_line_items(&OpportunityId::from("opp")).await.unwrap();
//!     assert_eq!(items[0].product.quantity_in_stock, 3.0);
//!
//!     system.shutdown().await.unwrap();
//! }
//! ```

pub mod error;
pub mod records;

pub use error::*;
pub use records::*;

use crate::error::ServiceError;
use crate::model::{LineItem, LineItemId, OpportunityId, Product, ProductId};
use crate::services::{IdentityService, LineItemDeleter, LineItemQuery, StockUpdater};
use async_trait::async_trait;
use record_store::{RecordActor, RecordClient};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Platform services backed by record-store clients.
#[derive(Clone)]
pub struct InMemoryCrm {
    products: RecordClient<ProductRecord>,
    line_items: RecordClient<LineItemRecord>,
    profile_name: String,
}

impl InMemoryCrm {
    /// Wraps existing store clients, e.g. clients handed out by a `MockStore`.
    pub fn new(
        products: RecordClient<ProductRecord>,
        line_items: RecordClient<LineItemRecord>,
        profile_name: impl Into<String>,
    ) -> Self {
        Self {
            products,
            line_items,
            profile_name: profile_name.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_product(&self, product: Product) -> Result<ProductId, ServiceError> {
        Ok(self.products.insert(product.into()).await?)
    }

    /// Attaches a product line to an opportunity. The product must already exist.
    #[instrument(skip(self, id, opportunity_id, product_id))]
    pub async fn add_line_item(
        &self,
        id: impl Into<LineItemId>,
        opportunity_id: impl Into<OpportunityId>,
        product_id: impl Into<ProductId>,
        quantity: f64,
        unit_price: f64,
    ) -> Result<LineItemId, ServiceError> {
        let product_id = product_id.into();
        if self.products.get(product_id.clone()).await?.is_none() {
            return Err(CrmError::UnknownProduct(product_id.to_string()).into());
        }
        let record = LineItemRecord {
            id: id.into(),
            opportunity_id: opportunity_id.into(),
            product_id,
            quantity,
            unit_price,
        };
        Ok(self.line_items.insert(record).await?)
    }

    /// Changes the ordered quantity of a line.
    #[instrument(skip(self))]
    pub async fn set_line_quantity(
        &self,
        id: &LineItemId,
        quantity: f64,
    ) -> Result<(), ServiceError> {
        self.line_items
            .patch(id.clone(), QuantityPatch { quantity })
            .await?;
        Ok(())
    }

    pub async fn product(&self, id: &ProductId) -> Result<Option<Product>, ServiceError> {
        Ok(self.products.get(id.clone()).await?.map(Product::from))
    }
}

#[async_trait]
impl LineItemQuery for InMemoryCrm {
    #[instrument(skip(self))]
    async fn fetch_line_items(
        &self,
        parent: &OpportunityId,
    ) -> Result<Vec<LineItem>, ServiceError> {
        let records = self.line_items.list(parent.clone()).await?;
        if records.is_empty() {
            return Err(ServiceError::NotFound(format!("no line items for {parent}")));
        }

        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let product = self
                .products
                .get(record.product_id.clone())
                .await?
                .ok_or_else(|| {
                    error!(
                        line = %record.id,
                        product = %record.product_id,
                        "line references missing product"
                    );
                    ServiceError::NotFound(record.product_id.to_string())
                })?;
            items.push(LineItem::new(
                record.id,
                record.opportunity_id,
                record.quantity,
                record.unit_price,
                product.into(),
            ));
        }
        debug!(count = items.len(), "line items fetched");
        Ok(items)
    }
}

#[async_trait]
impl LineItemDeleter for InMemoryCrm {
    #[instrument(skip(self))]
    async fn delete_line_item(&self, id: &LineItemId) -> Result<(), ServiceError> {
        self.line_items.delete(id.clone()).await?;
        Ok(())
    }
}

#[async_trait]
impl StockUpdater for InMemoryCrm {
    #[instrument(skip(self))]
    async fn update_stock(&self, product: &ProductId, quantity: f64) -> Result<(), ServiceError> {
        let patch = StockPatch {
            quantity_in_stock: quantity,
        };
        let updated = self.products.patch(product.clone(), patch).await?;
        debug!(stock = updated.quantity_in_stock, "stock updated");
        Ok(())
    }
}

#[async_trait]
impl IdentityService for InMemoryCrm {
    async fn current_user_profile_name(&self) -> Result<String, ServiceError> {
        Ok(self.profile_name.clone())
    }
}

/// Owns the platform's store actors.
///
/// # Shutdown
/// Dropping every clone of the platform's clients closes the store channels; each
/// `RecordActor` then leaves its loop. [`CrmSystem::shutdown`] drops its own handle and waits,
/// so shut down every panel (and drop any other `Arc<InMemoryCrm>`) first.
pub struct CrmSystem {
    pub crm: Arc<InMemoryCrm>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CrmSystem {
    /// Spawns the product and line-item stores. Must be called inside a Tokio runtime.
    pub fn start(profile_name: impl Into<String>) -> Self {
        let (product_actor, products) = RecordActor::<ProductRecord>::new(32);
        let (line_item_actor, line_items) = RecordActor::<LineItemRecord>::new(32);

        let product_handle = tokio::spawn(product_actor.run());
        let line_item_handle = tokio::spawn(line_item_actor.run());

        Self {
            crm: Arc::new(InMemoryCrm::new(products, line_items, profile_name)),
            handles: vec![product_handle, line_item_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down platform stores...");
        drop(self.crm);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Platform stores stopped.");
        Ok(())
    }
}
