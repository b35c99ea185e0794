pub mod create_shipment_command;
pub mod delete_shipment_command;
pub mod update_shipment_command;

pub use create_shipment_command::{CreateShipmentCommand, ShipmentReceipt};
pub use delete_shipment_command::DeleteShipmentCommand;
pub use update_shipment_command::UpdateShipmentCommand;

use crate::validation::non_negative_money;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Fields accepted when recording or editing a shipment.
///
/// `total_cost` is advisory: it is replaced by `unit_price * quantity`
/// whenever the product exists.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ShipmentInput {
    #[schema(example = 1)]
    pub supplier_id: i32,
    #[schema(example = 1)]
    pub product_id: i32,
    #[schema(example = 1)]
    pub warehouse_id: i32,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 20)]
    pub quantity: i32,

    pub shipment_date: DateTime<Utc>,

    #[serde(default)]
    #[validate(custom = "non_negative_money")]
    pub total_cost: Option<Decimal>,
}

impl ShipmentInput {
    pub fn supplied_total_cost(&self) -> Decimal {
        self.total_cost.unwrap_or(Decimal::ZERO).round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(quantity: i32, total_cost: Option<Decimal>) -> ShipmentInput {
        ShipmentInput {
            supplier_id: 1,
            product_id: 1,
            warehouse_id: 1,
            quantity,
            shipment_date: Utc::now(),
            total_cost,
        }
    }

    #[test]
    fn quantity_must_be_positive() {
        let errors = input(0, None).validate().unwrap_err();
        let quantity_errors = &errors.field_errors()["quantity"];
        assert_eq!(
            quantity_errors[0].message.as_deref(),
            Some("Quantity must be at least 1")
        );
    }

    #[test]
    fn negative_cost_is_rejected() {
        assert!(input(1, Some(dec!(-1))).validate().is_err());
        assert!(input(1, Some(dec!(0))).validate().is_ok());
    }

    #[test]
    fn missing_cost_defaults_to_zero() {
        assert_eq!(input(3, None).supplied_total_cost(), Decimal::ZERO);
    }

    #[test]
    fn shipment_date_is_required() {
        let body = serde_json::json!({
            "supplier_id": 1,
            "product_id": 1,
            "warehouse_id": 1,
            "quantity": 2
        });
        assert!(serde_json::from_value::<ShipmentInput>(body).is_err());
    }
}
