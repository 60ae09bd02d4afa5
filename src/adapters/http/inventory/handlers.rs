//! HTTP handlers for inventory endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::common::{
    internal_error, not_found, parse_id, validation_failed, CommandResponse,
};
use crate::adapters::http::ErrorResponse;
use crate::application::handlers::inventory::{
    AdjustStockCommand, AdjustStockHandler, CreateProductCommand, CreateProductHandler,
    DeleteProductCommand, DeleteProductHandler, ListMovementsHandler, ListProductsHandler,
};
use crate::domain::foundation::ProductId;
use crate::domain::inventory::InventoryError;

use super::dto::{CreateProductRequest, StockMovementRequest};

#[derive(Clone)]
pub struct InventoryHandlers {
    create_handler: Arc<CreateProductHandler>,
    adjust_handler: Arc<AdjustStockHandler>,
    delete_handler: Arc<DeleteProductHandler>,
    list_handler: Arc<ListProductsHandler>,
    movements_handler: Arc<ListMovementsHandler>,
}

impl InventoryHandlers {
    pub fn new(
        create_handler: Arc<CreateProductHandler>,
        adjust_handler: Arc<AdjustStockHandler>,
        delete_handler: Arc<DeleteProductHandler>,
        list_handler: Arc<ListProductsHandler>,
        movements_handler: Arc<ListMovementsHandler>,
    ) -> Self {
        Self {
            create_handler,
            adjust_handler,
            delete_handler,
            list_handler,
            movements_handler,
        }
    }
}

/// POST /api/inventory
pub async fn create_product(
    State(handlers): State<InventoryHandlers>,
    Json(req): Json<CreateProductRequest>,
) -> Response {
    let cmd = CreateProductCommand {
        name: req.name,
        sku: req.sku,
        category: req.category,
        price: req.price,
        cost: req.cost,
        stock_quantity: req.stock_quantity,
        low_stock_threshold: req.low_stock_threshold,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => handle_inventory_error(e),
    }
}

/// GET /api/inventory
pub async fn list_products(State(handlers): State<InventoryHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => handle_inventory_error(e),
    }
}

/// PUT /api/inventory/:id/stock
pub async fn adjust_stock(
    State(handlers): State<InventoryHandlers>,
    Path(id): Path<String>,
    Json(req): Json<StockMovementRequest>,
) -> Response {
    let id: ProductId = match parse_id(&id, "product") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AdjustStockCommand {
        id,
        movement: req.into(),
    };
    match handlers.adjust_handler.handle(cmd).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => handle_inventory_error(e),
    }
}

/// GET /api/inventory/:id/logs - movement history, oldest first
pub async fn list_movements(
    State(handlers): State<InventoryHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match parse_id(&id, "product") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.movements_handler.handle(id).await {
        Ok(logs) => (StatusCode::OK, Json(logs)).into_response(),
        Err(e) => handle_inventory_error(e),
    }
}

/// DELETE /api/inventory/:id
pub async fn delete_product(
    State(handlers): State<InventoryHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match parse_id(&id, "product") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete_handler.handle(DeleteProductCommand { id }).await {
        Ok(()) => {
            (StatusCode::OK, Json(CommandResponse::new(id, "Product deleted"))).into_response()
        }
        Err(e) => handle_inventory_error(e),
    }
}

fn handle_inventory_error(error: InventoryError) -> Response {
    match &error {
        InventoryError::NotFound(_) => not_found(error.code(), error.to_string()),
        InventoryError::InsufficientStock {
            available,
            requested,
        } => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::from_code(error.code(), error.to_string()).with_details(
                    serde_json::json!({ "available": available, "requested": requested }),
                ),
            ),
        )
            .into_response(),
        InventoryError::DuplicateSku(_) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::from_code(error.code(), error.to_string())),
        )
            .into_response(),
        InventoryError::ValidationFailed { field, message } => validation_failed(field, message),
        InventoryError::Infrastructure(_) => internal_error("Inventory operation", &error),
    }
}
