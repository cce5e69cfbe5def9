//! A product line attached to an opportunity.
//!
//! The panel holds a read-only working copy of these per load cycle. The copy is replaced
//! wholesale on reload, or patched by removing one entry after a delete.

use crate::model::Product;
use std::fmt::Display;

/// Type-safe identifier for line items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineItemId(pub String);

impl From<&str> for LineItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type-safe identifier for the parent opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpportunityId(pub String);

impl From<&str> for OpportunityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OpportunityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: LineItemId,
    pub opportunity_id: OpportunityId,
    pub quantity: f64,
    pub unit_price: f64,
    pub product: Product,
}

impl LineItem {
    pub fn new(
        id: impl Into<LineItemId>,
        opportunity_id: impl Into<OpportunityId>,
        quantity: f64,
        unit_price: f64,
        product: Product,
    ) -> Self {
        Self {
            id: id.into(),
            opportunity_id: opportunity_id.into(),
            quantity,
            unit_price,
            product,
        }
    }

    pub fn total_price(&self) -> f64 {
        self.quantity * self.unit_price
    }
}
