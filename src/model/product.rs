//! A product as seen from a line item: identity, display name and current stock level.
//!
//! The stock level is whatever the platform reported at load time. The panel never edits it
//! locally and reloads after a stock update instead.

use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub String);

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity_in_stock: f64,
}

impl Product {
    /// Creates a new Product snapshot.
    ///
    /// # Arguments
    /// * `id` - Platform identifier
    /// * `name` - Display name
    /// * `quantity_in_stock` - Units currently available
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, quantity_in_stock: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity_in_stock,
        }
    }
}
