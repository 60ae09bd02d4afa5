//! Inventory command and query handlers.

mod adjust_stock;
mod create_product;
mod delete_product;
mod list_products;

pub use adjust_stock::{AdjustStockCommand, AdjustStockHandler};
pub use create_product::{CreateProductCommand, CreateProductHandler};
pub use delete_product::{DeleteProductCommand, DeleteProductHandler};
pub use list_products::{ListMovementsHandler, ListProductsHandler};
