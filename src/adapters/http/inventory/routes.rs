//! HTTP routes for inventory endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    adjust_stock, create_product, delete_product, list_movements, list_products,
    InventoryHandlers,
};

pub fn inventory_routes(handlers: InventoryHandlers) -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", delete(delete_product))
        .route("/:id/stock", put(adjust_stock))
        .route("/:id/logs", get(list_movements))
        .with_state(handlers)
}
