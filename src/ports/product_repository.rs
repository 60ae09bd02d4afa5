//! Product repository port, including the stock movement audit trail.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProductId};
use crate::domain::inventory::{InventoryError, InventoryLog, Product, StockMovement};

/// Repository port for Product persistence.
///
/// Implementations must keep SKUs unique and reject a duplicate with
/// `DuplicateSku`.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn save(&self, product: &Product) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// All products, newest first.
    async fn list(&self) -> Result<Vec<Product>, DomainError>;

    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError>;

    /// Applies `movement` to the stored product and appends it to the audit
    /// trail as one step; concurrent movements on a product never interleave.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the product doesn't exist
    /// - `InsufficientStock` if an OUT movement exceeds stock; nothing is
    ///   written or logged
    async fn apply_movement(
        &self,
        id: &ProductId,
        movement: StockMovement,
    ) -> Result<Product, InventoryError>;

    /// Movements for one product, oldest first.
    async fn movements_for(&self, id: &ProductId) -> Result<Vec<InventoryLog>, DomainError>;
}
