use crate::{
    commands::{Command, DeleteResult},
    db::DbPool,
    entities::shipment,
    errors::ServiceError,
    events::{Event, EventSender},
};
use async_trait::async_trait;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Removes the shipment record only; stock already booked stays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteShipmentCommand {
    pub id: i32,
}

#[async_trait]
impl Command for DeleteShipmentCommand {
    type Result = DeleteResult;

    #[instrument(skip(self, db_pool, event_sender), fields(shipment_id = self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let outcome = shipment::Entity::delete_by_id(self.id)
            .exec(db_pool.as_ref())
            .await?;

        let deleted = outcome.rows_affected > 0;
        if deleted {
            info!("Shipment deleted");
            event_sender.send_or_log(Event::ShipmentDeleted(self.id)).await;
        } else {
            info!("Shipment already absent");
        }

        Ok(DeleteResult {
            id: self.id,
            deleted,
        })
    }
}
