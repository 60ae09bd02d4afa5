use std::sync::Arc;

use crate::domain::foundation::ProductId;
use crate::domain::inventory::{InventoryError, Product};
use crate::domain::realtime::DomainEvent;
use crate::ports::ProductRepository;

use super::super::ChangeNotifier;

#[derive(Debug, Clone, Copy)]
pub struct DeleteProductCommand {
    pub id: ProductId,
}

pub struct DeleteProductHandler {
    products: Arc<dyn ProductRepository>,
    notifier: ChangeNotifier,
}

impl DeleteProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, notifier: ChangeNotifier) -> Self {
        Self { products, notifier }
    }

    pub async fn handle(&self, cmd: DeleteProductCommand) -> Result<(), InventoryError> {
        if !self.products.delete(&cmd.id).await? {
            return Err(InventoryError::NotFound(cmd.id));
        }
        self.notifier.entity(DomainEvent::<Product>::Deleted(cmd.id)).await;
        self.notifier.dashboard().await;
        Ok(())
    }
}
