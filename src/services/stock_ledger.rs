//! Per-warehouse stock bookkeeping driven by inbound shipments.

use crate::{
    entities::{product, product_warehouse},
    errors::ServiceError,
    events::Event,
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set,
};
use tracing::{debug, instrument};

/// Outcome of one ledger application.
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub row: product_warehouse::Model,
    /// `None` when the row was created by this change.
    pub previous_quantity: Option<i32>,
}

impl StockChange {
    pub fn event(&self) -> Event {
        Event::StockAdjusted {
            product_id: self.row.product_id,
            warehouse_id: self.row.warehouse_id,
            old_quantity: self.previous_quantity,
            new_quantity: self.row.quantity,
        }
    }
}

/// Maintains one quantity row per (product, warehouse) pair.
///
/// Implementations run on the caller's transaction so the stock change commits
/// or rolls back together with the shipment that caused it.
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Adds `quantity_delta` to the pair's row, creating it when absent.
    ///
    /// A result below zero or past `i32::MAX` is refused with
    /// `ConstraintViolation` so the `quantity >= 0` column check never fires.
    async fn apply_shipment(
        &self,
        txn: &DatabaseTransaction,
        product_id: i32,
        warehouse_id: i32,
        quantity_delta: i32,
    ) -> Result<StockChange, ServiceError>;
}

/// Read-modify-write ledger over the `product_warehouses` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockLedgerUpdater;

#[async_trait]
impl StockLedger for StockLedgerUpdater {
    #[instrument(skip(self, txn))]
    async fn apply_shipment(
        &self,
        txn: &DatabaseTransaction,
        product_id: i32,
        warehouse_id: i32,
        quantity_delta: i32,
    ) -> Result<StockChange, ServiceError> {
        let existing = product_warehouse::Entity::find()
            .filter(product_warehouse::Column::ProductId.eq(product_id))
            .filter(product_warehouse::Column::WarehouseId.eq(warehouse_id))
            .one(txn)
            .await?;

        let now = Utc::now();

        match existing {
            Some(row) => {
                let previous = row.quantity;
                let quantity = next_quantity(previous, quantity_delta)?;

                let mut active: product_warehouse::ActiveModel = row.into();
                active.quantity = Set(quantity);
                active.last_updated = Set(now);
                let row = active.update(txn).await?;

                debug!(product_id, warehouse_id, previous, quantity, "Stock row updated");
                Ok(StockChange {
                    row,
                    previous_quantity: Some(previous),
                })
            }
            None => {
                let quantity = next_quantity(0, quantity_delta)?;

                let row = product_warehouse::ActiveModel {
                    product_id: Set(product_id),
                    warehouse_id: Set(warehouse_id),
                    quantity: Set(quantity),
                    last_updated: Set(now),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                debug!(product_id, warehouse_id, quantity, "Stock row created");
                Ok(StockChange {
                    row,
                    previous_quantity: None,
                })
            }
        }
    }
}

fn next_quantity(current: i32, delta: i32) -> Result<i32, ServiceError> {
    match current.checked_add(delta) {
        Some(q) if q >= 0 => Ok(q),
        Some(q) => Err(ServiceError::ConstraintViolation(format!(
            "stock quantity cannot become negative ({})",
            q
        ))),
        None => Err(ServiceError::ConstraintViolation(format!(
            "stock quantity overflow: {} + {}",
            current, delta
        ))),
    }
}

/// Line total for a shipment.
///
/// With a known product the caller's value is discarded and the cost is
/// `unit_price * quantity` in cents. Without one the supplied value is kept.
pub fn resolve_total_cost(
    product: Option<&product::Model>,
    quantity: i32,
    supplied: Decimal,
) -> Decimal {
    match product {
        Some(p) => (p.unit_price.round_dp(2) * Decimal::from(quantity)).round_dp(2),
        None => supplied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{establish_connection_with_config, run_migrations, DbConfig, DbPool};
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use sea_orm::TransactionTrait;

    async fn seeded_pool() -> DbPool {
        let config = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = establish_connection_with_config(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn laptop() -> product::Model {
        product::Model {
            id: 1,
            name: "Laptop".into(),
            description: None,
            unit_price: dec!(999.99),
            category: None,
            sku: None,
        }
    }

    #[test]
    fn known_product_overrides_supplied_cost() {
        assert_eq!(
            resolve_total_cost(Some(&laptop()), 2, dec!(1.00)),
            dec!(1999.98)
        );
    }

    #[test]
    fn missing_product_keeps_supplied_cost() {
        assert_eq!(resolve_total_cost(None, 2, dec!(12.34)), dec!(12.34));
    }

    proptest! {
        #[test]
        fn cost_is_price_times_quantity(cents in 1i64..=500_000, quantity in 1i32..10_000) {
            let product = product::Model {
                unit_price: Decimal::new(cents, 2),
                ..laptop()
            };
            prop_assert_eq!(
                resolve_total_cost(Some(&product), quantity, dec!(0.01)),
                Decimal::new(cents * i64::from(quantity), 2)
            );
        }
    }

    #[test]
    fn quantity_bounds() {
        assert_eq!(next_quantity(50, -50).unwrap(), 0);
        assert_matches!(next_quantity(1, -2), Err(ServiceError::ConstraintViolation(_)));
        assert_matches!(
            next_quantity(i32::MAX, 1),
            Err(ServiceError::ConstraintViolation(_))
        );
    }

    #[tokio::test]
    async fn existing_row_is_incremented() {
        let pool = seeded_pool().await;
        let txn = pool.begin().await.unwrap();

        let change = StockLedgerUpdater
            .apply_shipment(&txn, 1, 1, 5)
            .await
            .unwrap();
        txn.commit().await.unwrap();

        assert_eq!(change.previous_quantity, Some(50));
        assert_eq!(change.row.quantity, 55);
        assert_eq!(change.row.id, 1);
    }

    #[tokio::test]
    async fn missing_row_is_created_with_delta() {
        let pool = seeded_pool().await;
        let txn = pool.begin().await.unwrap();

        let change = StockLedgerUpdater
            .apply_shipment(&txn, 3, 1, 7)
            .await
            .unwrap();
        txn.commit().await.unwrap();

        assert_eq!(change.previous_quantity, None);
        assert_eq!(change.row.quantity, 7);

        let rows = product_warehouse::Entity::find()
            .filter(product_warehouse::Column::ProductId.eq(3))
            .filter(product_warehouse::Column::WarehouseId.eq(1))
            .all(&pool)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn change_is_discarded_with_the_transaction() {
        let pool = seeded_pool().await;
        let txn = pool.begin().await.unwrap();
        StockLedgerUpdater
            .apply_shipment(&txn, 2, 1, 10)
            .await
            .unwrap();
        txn.rollback().await.unwrap();

        let row = product_warehouse::Entity::find_by_id(3)
            .one(&pool)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.quantity, 75);
    }

    #[test]
    fn change_event_carries_both_quantities() {
        let change = StockChange {
            row: product_warehouse::Model {
                id: 9,
                product_id: 2,
                warehouse_id: 3,
                quantity: 60,
                last_updated: Utc::now(),
            },
            previous_quantity: Some(45),
        };
        assert_eq!(
            change.event(),
            Event::StockAdjusted {
                product_id: 2,
                warehouse_id: 3,
                old_quantity: Some(45),
                new_quantity: 60,
            }
        );
    }
}
