//! Inventory HTTP area.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateProductRequest, StockMovementRequest};
pub use handlers::InventoryHandlers;
pub use routes::inventory_routes;
