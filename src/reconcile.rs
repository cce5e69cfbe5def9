//! # Stock Reconciliation
//!
//! Derives the presentation state of each row from ordered quantity vs. quantity in stock.
//! Everything here is pure and recomputed on demand; a [`DerivedRow`] is never stored across
//! a reload, so a stock edit can never leave a stale flag behind.

use crate::model::LineItem;

/// Visual treatment of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    Normal,
    OverStock,
}

/// A line item annotated with its over-stock state.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub item: LineItem,
    pub is_over_stock: bool,
    pub style_tag: StyleTag,
}

impl DerivedRow {
    pub fn from_item(item: LineItem) -> Self {
        let is_over_stock = item.quantity > item.product.quantity_in_stock;
        let style_tag = if is_over_stock {
            StyleTag::OverStock
        } else {
            StyleTag::Normal
        };
        Self {
            item,
            is_over_stock,
            style_tag,
        }
    }

    /// Stock left once this line is fulfilled. Negative exactly when the row is over stock.
    pub fn quantity_remaining(&self) -> f64 {
        self.item.product.quantity_in_stock - self.item.quantity
    }
}

/// Annotates every item, preserving order.
pub fn annotate(items: &[LineItem]) -> Vec<DerivedRow> {
    items.iter().cloned().map(DerivedRow::from_item).collect()
}

/// True iff at least one row is over stock.
pub fn any_over_stock(rows: &[DerivedRow]) -> bool {
    rows.iter().any(|row| row.is_over_stock)
}
