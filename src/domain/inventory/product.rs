//! Product aggregate and stock movements.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{required_text, ProductId, Timestamp, ValidationError};
use crate::domain::realtime::{Entity, EntityKind};

use super::errors::InventoryError;

pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Availability bucket, recomputed on every stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn for_quantity(quantity: u32, low_stock_threshold: u32) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }

    pub fn needs_attention(&self) -> bool {
        !matches!(self, StockStatus::InStock)
    }
}

/// Direction of a stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Received stock.
    In,
    /// Consumed or sold stock.
    Out,
    /// Absolute recount.
    Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockMovement {
    pub movement: MovementType,
    pub quantity: u32,
}

/// Audit record of one stock movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLog {
    pub product: ProductId,
    #[serde(rename = "type")]
    pub movement: MovementType,
    pub quantity: u32,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    price: f64,
    cost: f64,
    stock_quantity: u32,
    low_stock_threshold: u32,
    stock_status: StockStatus,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub stock_quantity: Option<u32>,
    pub low_stock_threshold: Option<u32>,
}

fn money(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::invalid_format(
            field,
            "must be a non-negative number",
        ));
    }
    Ok(value)
}

impl Product {
    pub fn new(input: NewProduct) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        let stock_quantity = input.stock_quantity.unwrap_or(0);
        let low_stock_threshold = input
            .low_stock_threshold
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
        Ok(Self {
            id: ProductId::new(),
            name: required_text("name", &input.name)?,
            sku: required_text("sku", &input.sku)?.to_uppercase(),
            category: input
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            price: money("price", input.price)?,
            cost: money("cost", input.cost)?,
            stock_quantity,
            low_stock_threshold,
            stock_status: StockStatus::for_quantity(stock_quantity, low_stock_threshold),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a movement and returns the audit record for it.
    ///
    /// An `Out` larger than the current stock is rejected and leaves the
    /// product unchanged.
    pub fn apply_movement(&mut self, movement: StockMovement) -> Result<InventoryLog, InventoryError> {
        self.stock_quantity = match movement.movement {
            MovementType::In => self.stock_quantity.saturating_add(movement.quantity),
            MovementType::Out => self
                .stock_quantity
                .checked_sub(movement.quantity)
                .ok_or(InventoryError::InsufficientStock {
                    available: self.stock_quantity,
                    requested: movement.quantity,
                })?,
            MovementType::Adjustment => movement.quantity,
        };
        self.stock_status = StockStatus::for_quantity(self.stock_quantity, self.low_stock_threshold);
        self.updated_at = Timestamp::now();

        Ok(InventoryLog {
            product: self.id,
            movement: movement.movement,
            quantity: movement.quantity,
            created_at: self.updated_at,
        })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    pub fn stock_status(&self) -> StockStatus {
        self.stock_status
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

impl Entity for Product {
    type Id = ProductId;
    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: u32) -> Product {
        Product::new(NewProduct {
            name: "Gloves".to_string(),
            sku: "glv-01".to_string(),
            price: 9.5,
            cost: 4.0,
            stock_quantity: Some(stock),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn sku_is_uppercased() {
        assert_eq!(product(10).sku(), "GLV-01");
    }

    #[test]
    fn status_tracks_thresholds() {
        assert_eq!(StockStatus::for_quantity(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::for_quantity(5, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::for_quantity(6, 5), StockStatus::InStock);
    }

    #[test]
    fn stock_in_and_out() {
        let mut p = product(10);
        p.apply_movement(StockMovement {
            movement: MovementType::Out,
            quantity: 7,
        })
        .unwrap();
        assert_eq!(p.stock_quantity(), 3);
        assert_eq!(p.stock_status(), StockStatus::LowStock);

        let log = p
            .apply_movement(StockMovement {
                movement: MovementType::In,
                quantity: 20,
            })
            .unwrap();
        assert_eq!(p.stock_quantity(), 23);
        assert_eq!(log.movement, MovementType::In);
        assert_eq!(log.product, *p.id());
    }

    #[test]
    fn overdraw_is_rejected_without_change() {
        let mut p = product(2);
        let err = p
            .apply_movement(StockMovement {
                movement: MovementType::Out,
                quantity: 3,
            })
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                available: 2,
                requested: 3
            }
        );
        assert_eq!(p.stock_quantity(), 2);
    }

    #[test]
    fn adjustment_sets_absolute_quantity() {
        let mut p = product(40);
        p.apply_movement(StockMovement {
            movement: MovementType::Adjustment,
            quantity: 0,
        })
        .unwrap();
        assert_eq!(p.stock_status(), StockStatus::OutOfStock);
    }

    #[test]
    fn stock_status_uses_display_names_on_the_wire() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"Out of Stock\"");
        let movement: MovementType = serde_json::from_str("\"ADJUSTMENT\"").unwrap();
        assert_eq!(movement, MovementType::Adjustment);
    }
}
