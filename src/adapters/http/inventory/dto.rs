//! Request types for inventory endpoints.

use serde::Deserialize;

use crate::domain::inventory::{MovementType, StockMovement};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub stock_quantity: Option<u32>,
    #[serde(default)]
    pub low_stock_threshold: Option<u32>,
}

/// Body of `PUT /api/inventory/:id/stock`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StockMovementRequest {
    pub quantity: u32,
    #[serde(rename = "type")]
    pub movement: MovementType,
}

impl From<StockMovementRequest> for StockMovement {
    fn from(req: StockMovementRequest) -> Self {
        StockMovement {
            movement: req.movement,
            quantity: req.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_request_reads_type_field() {
        let req: StockMovementRequest =
            serde_json::from_str(r#"{"quantity":3,"type":"OUT"}"#).unwrap();
        let movement: StockMovement = req.into();
        assert_eq!(movement.movement, MovementType::Out);
        assert_eq!(movement.quantity, 3);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(serde_json::from_str::<StockMovementRequest>(r#"{"quantity":-1,"type":"IN"}"#).is_err());
    }
}
