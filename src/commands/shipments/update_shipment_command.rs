use crate::{
    commands::Command,
    db::{with_transaction, DbPool},
    entities::{product, shipment},
    errors::ServiceError,
    events::{Event, EventSender},
    services::stock_ledger::{resolve_total_cost, StockChange, StockLedger, StockLedgerUpdater},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::ShipmentInput;

/// Edits a shipment and recomputes its total cost.
///
/// Stock rows are left alone unless `reconcile_stock` is set, in which case
/// the old quantity is taken back from the old pair and the new quantity is
/// booked against the new pair in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShipmentCommand {
    pub id: i32,
    pub input: ShipmentInput,
    #[serde(default)]
    pub reconcile_stock: bool,
}

#[async_trait]
impl Command for UpdateShipmentCommand {
    type Result = shipment::Model;

    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.execute_with_ledger(db_pool, event_sender, Arc::new(StockLedgerUpdater))
            .await
    }
}

impl UpdateShipmentCommand {
    #[instrument(
        skip(self, db_pool, event_sender, ledger),
        fields(shipment_id = self.id, reconcile_stock = self.reconcile_stock)
    )]
    pub async fn execute_with_ledger(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        ledger: Arc<dyn StockLedger>,
    ) -> Result<shipment::Model, ServiceError> {
        self.input.validate()?;

        let id = self.id;
        let input = self.input.clone();
        let reconcile = self.reconcile_stock;

        let (updated, changes) = with_transaction(db_pool.as_ref(), "update_shipment", move |txn| {
            Box::pin(async move {
                let existing = shipment::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(format!("Shipment {} not found", id)))?;

                let product = product::Entity::find_by_id(input.product_id)
                    .one(txn)
                    .await?;
                let total_cost = resolve_total_cost(
                    product.as_ref(),
                    input.quantity,
                    input.supplied_total_cost(),
                );

                let mut changes: Vec<StockChange> = Vec::new();
                if reconcile {
                    let same_pair = existing.product_id == input.product_id
                        && existing.warehouse_id == input.warehouse_id;
                    if same_pair {
                        let delta = input.quantity - existing.quantity;
                        if delta != 0 {
                            changes.push(
                                ledger
                                    .apply_shipment(txn, input.product_id, input.warehouse_id, delta)
                                    .await?,
                            );
                        }
                    } else {
                        changes.push(
                            ledger
                                .apply_shipment(
                                    txn,
                                    existing.product_id,
                                    existing.warehouse_id,
                                    -existing.quantity,
                                )
                                .await?,
                        );
                        changes.push(
                            ledger
                                .apply_shipment(
                                    txn,
                                    input.product_id,
                                    input.warehouse_id,
                                    input.quantity,
                                )
                                .await?,
                        );
                    }
                }

                let mut model: shipment::ActiveModel = existing.into();
                model.supplier_id = Set(input.supplier_id);
                model.product_id = Set(input.product_id);
                model.warehouse_id = Set(input.warehouse_id);
                model.quantity = Set(input.quantity);
                model.shipment_date = Set(input.shipment_date);
                model.total_cost = Set(total_cost);
                let updated = model.update(txn).await?;

                Ok((updated, changes))
            })
        })
        .await?;

        info!(total_cost = %updated.total_cost, stock_changes = changes.len(), "Shipment updated");
        event_sender
            .send_or_log(Event::ShipmentUpdated(updated.id))
            .await;
        for change in &changes {
            event_sender.send_or_log(change.event()).await;
        }

        Ok(updated)
    }
}
