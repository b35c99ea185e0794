use crate::{
    commands::Command,
    db::{with_transaction, DbPool},
    entities::{product, product_warehouse, shipment},
    errors::ServiceError,
    events::{Event, EventSender},
    services::stock_ledger::{resolve_total_cost, StockLedger, StockLedgerUpdater},
};
use async_trait::async_trait;
use metrics::counter;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

use super::ShipmentInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShipmentCommand {
    pub input: ShipmentInput,
}

/// The recorded shipment together with the stock row it changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentReceipt {
    pub shipment: shipment::Model,
    pub stock: product_warehouse::Model,
    pub previous_quantity: Option<i32>,
}

#[async_trait]
impl Command for CreateShipmentCommand {
    type Result = ShipmentReceipt;

    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.execute_with_ledger(db_pool, event_sender, Arc::new(StockLedgerUpdater))
            .await
    }
}

impl CreateShipmentCommand {
    /// Prices the shipment, stores it, and books the stock, all in one
    /// transaction. Nothing is written if any step fails.
    #[instrument(
        skip(self, db_pool, event_sender, ledger),
        fields(
            product_id = self.input.product_id,
            warehouse_id = self.input.warehouse_id,
            quantity = self.input.quantity
        )
    )]
    pub async fn execute_with_ledger(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        ledger: Arc<dyn StockLedger>,
    ) -> Result<ShipmentReceipt, ServiceError> {
        self.input.validate()?;

        let input = self.input.clone();
        let receipt = with_transaction(db_pool.as_ref(), "create_shipment", move |txn| {
            Box::pin(async move {
                let product = product::Entity::find_by_id(input.product_id)
                    .one(txn)
                    .await?;
                let total_cost = resolve_total_cost(
                    product.as_ref(),
                    input.quantity,
                    input.supplied_total_cost(),
                );

                let shipment = shipment::ActiveModel {
                    supplier_id: Set(input.supplier_id),
                    product_id: Set(input.product_id),
                    warehouse_id: Set(input.warehouse_id),
                    quantity: Set(input.quantity),
                    shipment_date: Set(input.shipment_date),
                    total_cost: Set(total_cost),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                let change = ledger
                    .apply_shipment(txn, input.product_id, input.warehouse_id, input.quantity)
                    .await?;

                Ok(ShipmentReceipt {
                    shipment,
                    stock: change.row,
                    previous_quantity: change.previous_quantity,
                })
            })
        })
        .await
        .map_err(|e| {
            counter!("inventory.shipments.failed", 1);
            error!(error = %e, "Shipment was not recorded");
            e
        })?;

        counter!("inventory.shipments.created", 1);
        info!(
            shipment_id = receipt.shipment.id,
            total_cost = %receipt.shipment.total_cost,
            stock_quantity = receipt.stock.quantity,
            "Shipment recorded"
        );

        event_sender
            .send_or_log(Event::ShipmentCreated {
                shipment_id: receipt.shipment.id,
                product_id: receipt.shipment.product_id,
                warehouse_id: receipt.shipment.warehouse_id,
                quantity: receipt.shipment.quantity,
            })
            .await;
        event_sender
            .send_or_log(Event::StockAdjusted {
                product_id: receipt.stock.product_id,
                warehouse_id: receipt.stock.warehouse_id,
                old_quantity: receipt.previous_quantity,
                new_quantity: receipt.stock.quantity,
            })
            .await;

        Ok(receipt)
    }
}
