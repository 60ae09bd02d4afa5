use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::domain::inventory::{InventoryError, InventoryLog, Product, StockMovement};
use crate::ports::ProductRepository;

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
    movements: RwLock<Vec<InventoryLog>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.sku() == product.sku()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateSku,
                format!("SKU already in use: {}", product.sku()),
            )
            .with_detail("sku", product.sku()));
        }
        products.insert(0, product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.read().await.iter().find(|p| p.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.read().await.clone())
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id() != id);
        Ok(products.len() != before)
    }

    async fn apply_movement(
        &self,
        id: &ProductId,
        movement: StockMovement,
    ) -> Result<Product, InventoryError> {
        let mut products = self.products.write().await;
        let slot = products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(InventoryError::NotFound(*id))?;

        let mut updated = slot.clone();
        let log = updated.apply_movement(movement)?;
        *slot = updated.clone();
        // Still under the products lock, so the trail keeps commit order.
        self.movements.write().await.push(log);
        Ok(updated)
    }

    async fn movements_for(&self, id: &ProductId) -> Result<Vec<InventoryLog>, DomainError> {
        Ok(self
            .movements
            .read()
            .await
            .iter()
            .filter(|log| log.product == *id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::{MovementType, NewProduct};
    use std::sync::Arc;

    fn product(sku: &str) -> Product {
        Product::new(NewProduct {
            name: "Item".to_string(),
            sku: sku.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_sku_is_rejected_case_insensitively() {
        let repo = InMemoryProductRepository::new();
        repo.save(&product("abc")).await.unwrap();
        let err = repo.save(&product("ABC")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateSku);
        assert_eq!(err.details.get("sku").map(String::as_str), Some("ABC"));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_out_movements_never_oversell() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let mut item = product("soap");
        item.apply_movement(StockMovement {
            movement: MovementType::Adjustment,
            quantity: 5,
        })
        .unwrap();
        repo.save(&item).await.unwrap();
        let id = *item.id();

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.apply_movement(
                        &id,
                        StockMovement {
                            movement: MovementType::Out,
                            quantity: 1,
                        },
                    )
                    .await
                })
            })
            .collect();
        let mut accepted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 5);
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().stock_quantity(), 0);
        assert_eq!(repo.movements_for(&id).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn movement_on_missing_product_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let ghost = ProductId::new();
        let err = repo
            .apply_movement(
                &ghost,
                StockMovement {
                    movement: MovementType::In,
                    quantity: 1,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, InventoryError::NotFound(ghost));
    }
}
