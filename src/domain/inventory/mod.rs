//! Inventory module - products, stock levels, and movement audit.

mod errors;
mod product;

pub use errors::InventoryError;
pub use product::{
    InventoryLog, MovementType, NewProduct, Product, StockMovement, StockStatus,
    DEFAULT_LOW_STOCK_THRESHOLD,
};
