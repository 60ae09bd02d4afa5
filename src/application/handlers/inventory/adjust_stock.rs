//! AdjustStockHandler - applies a stock movement and records it.

use std::sync::Arc;

use crate::domain::foundation::ProductId;
use crate::domain::inventory::{InventoryError, Product, StockMovement};
use crate::domain::realtime::DomainEvent;
use crate::ports::ProductRepository;

use super::super::ChangeNotifier;

#[derive(Debug, Clone, Copy)]
pub struct AdjustStockCommand {
    pub id: ProductId,
    pub movement: StockMovement,
}

pub struct AdjustStockHandler {
    products: Arc<dyn ProductRepository>,
    notifier: ChangeNotifier,
}

impl AdjustStockHandler {
    pub fn new(products: Arc<dyn ProductRepository>, notifier: ChangeNotifier) -> Self {
        Self { products, notifier }
    }

    pub async fn handle(&self, cmd: AdjustStockCommand) -> Result<Product, InventoryError> {
        let product = self.products.apply_movement(&cmd.id, cmd.movement).await?;
        tracing::debug!(
            product_id = %product.id(),
            quantity = product.stock_quantity(),
            status = product.stock_status().as_str(),
            "stock adjusted"
        );

        self.notifier.entity(DomainEvent::Updated(product.clone())).await;
        self.notifier.dashboard().await;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProductRepository;
    use crate::adapters::realtime::RecordingPublisher;
    use crate::domain::inventory::{MovementType, NewProduct, StockStatus};
    use crate::domain::realtime::Topic;

    async fn setup(stock: u32) -> (AdjustStockHandler, Arc<InMemoryProductRepository>, Arc<RecordingPublisher>, ProductId) {
        let products = Arc::new(InMemoryProductRepository::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let product = Product::new(NewProduct {
            name: "Oil".to_string(),
            sku: "oil".to_string(),
            stock_quantity: Some(stock),
            ..Default::default()
        })
        .unwrap();
        products.save(&product).await.unwrap();
        let handler = AdjustStockHandler::new(products.clone(), ChangeNotifier::new(publisher.clone()));
        (handler, products, publisher, *product.id())
    }

    #[tokio::test]
    async fn stock_out_publishes_stock_updated_and_logs_movement() {
        let (handler, products, publisher, id) = setup(8).await;

        let product = handler
            .handle(AdjustStockCommand {
                id,
                movement: StockMovement {
                    movement: MovementType::Out,
                    quantity: 4,
                },
            })
            .await
            .unwrap();

        assert_eq!(product.stock_status(), StockStatus::LowStock);
        assert_eq!(products.movements_for(&id).await.unwrap().len(), 1);
        assert_eq!(publisher.topics(), vec![Topic::StockUpdated, Topic::DashboardUpdated]);
        let payload = publisher.notifications_for(Topic::StockUpdated)[0]
            .payload
            .clone()
            .unwrap();
        assert_eq!(payload["stockQuantity"], 4);
        assert_eq!(payload["stockStatus"], "Low Stock");
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let (handler, _products, publisher, _id) = setup(3).await;
        let ghost = ProductId::new();

        let err = handler
            .handle(AdjustStockCommand {
                id: ghost,
                movement: StockMovement {
                    movement: MovementType::In,
                    quantity: 1,
                },
            })
            .await
            .unwrap_err();

        assert_eq!(err, InventoryError::NotFound(ghost));
        assert!(publisher.topics().is_empty());
    }

    #[tokio::test]
    async fn insufficient_stock_is_rejected_without_side_effects() {
        let (handler, products, publisher, id) = setup(1).await;

        let err = handler
            .handle(AdjustStockCommand {
                id,
                movement: StockMovement {
                    movement: MovementType::Out,
                    quantity: 2,
                },
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InventoryError::InsufficientStock { available: 1, requested: 2 }));
        assert!(products.movements_for(&id).await.unwrap().is_empty());
        assert!(publisher.topics().is_empty());
    }
}
