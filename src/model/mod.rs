//! Plain data carried between the platform services and the panel.

pub mod line_item;
pub mod product;

pub use line_item::*;
pub use product::*;
