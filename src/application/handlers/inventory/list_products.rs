//! Inventory query handlers.

use std::sync::Arc;

use crate::domain::foundation::ProductId;
use crate::domain::inventory::{InventoryError, InventoryLog, Product};
use crate::ports::ProductRepository;

/// Lists every product, newest first.
pub struct ListProductsHandler {
    products: Arc<dyn ProductRepository>,
}

impl ListProductsHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(&self) -> Result<Vec<Product>, InventoryError> {
        Ok(self.products.list().await?)
    }
}

/// Stock movement history of one product, oldest first.
pub struct ListMovementsHandler {
    products: Arc<dyn ProductRepository>,
}

impl ListMovementsHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(&self, id: ProductId) -> Result<Vec<InventoryLog>, InventoryError> {
        if self.products.find_by_id(&id).await?.is_none() {
            return Err(InventoryError::NotFound(id));
        }
        Ok(self.products.movements_for(&id).await?)
    }
}
