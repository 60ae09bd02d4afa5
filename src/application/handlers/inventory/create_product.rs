//! CreateProductHandler - adds a product to inventory.

use std::sync::Arc;

use crate::domain::inventory::{InventoryError, NewProduct, Product};
use crate::domain::realtime::DomainEvent;
use crate::ports::ProductRepository;

use super::super::ChangeNotifier;

#[derive(Debug, Clone, Default)]
pub struct CreateProductCommand {
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub stock_quantity: Option<u32>,
    pub low_stock_threshold: Option<u32>,
}

pub struct CreateProductHandler {
    products: Arc<dyn ProductRepository>,
    notifier: ChangeNotifier,
}

impl CreateProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, notifier: ChangeNotifier) -> Self {
        Self { products, notifier }
    }

    pub async fn handle(&self, cmd: CreateProductCommand) -> Result<Product, InventoryError> {
        let product = Product::new(NewProduct {
            name: cmd.name,
            sku: cmd.sku,
            category: cmd.category,
            price: cmd.price,
            cost: cmd.cost,
            stock_quantity: cmd.stock_quantity,
            low_stock_threshold: cmd.low_stock_threshold,
        })?;
        self.products.save(&product).await?;
        tracing::info!(product_id = %product.id(), sku = product.sku(), "product created");

        self.notifier.entity(DomainEvent::Created(product.clone())).await;
        self.notifier.dashboard().await;
        Ok(product)
    }
}
