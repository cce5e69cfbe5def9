//! [`Record`] implementations for the platform's two stored objects.
//!
//! Line items store only a product reference; the product snapshot a panel sees is joined in
//! at query time, so a stock change shows up on every line that references the product.

use super::error::CrmError;
use crate::model::{LineItemId, OpportunityId, Product, ProductId};
use record_store::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub quantity_in_stock: f64,
}

/// New stock level for a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockPatch {
    pub quantity_in_stock: f64,
}

fn valid_level(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl From<Product> for ProductRecord {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            quantity_in_stock: p.quantity_in_stock,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        Product::new(r.id, r.name, r.quantity_in_stock)
    }
}

impl Record for ProductRecord {
    type Id = ProductId;
    type Parent = ();
    type Patch = StockPatch;
    type Error = CrmError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn on_insert(&self) -> Result<(), CrmError> {
        if !valid_level(self.quantity_in_stock) {
            return Err(CrmError::InvalidStock(self.quantity_in_stock));
        }
        Ok(())
    }

    fn apply(&mut self, patch: StockPatch) -> Result<(), CrmError> {
        if !valid_level(patch.quantity_in_stock) {
            return Err(CrmError::InvalidStock(patch.quantity_in_stock));
        }
        self.quantity_in_stock = patch.quantity_in_stock;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRecord {
    pub id: LineItemId,
    pub opportunity_id: OpportunityId,
    pub product_id: ProductId,
    pub quantity: f64,
    pub unit_price: f64,
}

/// New ordered quantity for a line item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityPatch {
    pub quantity: f64,
}

impl Record for LineItemRecord {
    type Id = LineItemId;
    type Parent = OpportunityId;
    type Patch = QuantityPatch;
    type Error = CrmError;

    fn id(&self) -> &LineItemId {
        &self.id
    }

    fn parent(&self) -> Option<&OpportunityId> {
        Some(&self.opportunity_id)
    }

    fn on_insert(&self) -> Result<(), CrmError> {
        if !valid_level(self.quantity) {
            return Err(CrmError::InvalidQuantity(self.quantity));
        }
        Ok(())
    }

    fn apply(&mut self, patch: QuantityPatch) -> Result<(), CrmError> {
        if !valid_level(patch.quantity) {
            return Err(CrmError::InvalidQuantity(patch.quantity));
        }
        self.quantity = patch.quantity;
        Ok(())
    }
}
