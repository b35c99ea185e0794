use crate::{
    commands::Command,
    db::DbPool,
    entities::warehouse,
    errors::ServiceError,
    events::{Event, EventSender},
};
use async_trait::async_trait;
use metrics::counter;
use sea_orm::ActiveModelTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

use super::WarehouseInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWarehouseCommand {
    pub input: WarehouseInput,
}

#[async_trait]
impl Command for CreateWarehouseCommand {
    type Result = warehouse::Model;

    #[instrument(skip(self, db_pool, event_sender), fields(name = %self.input.name))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let input = self.input.clone().normalized();
        input.validate()?;

        let mut model = <warehouse::ActiveModel as Default>::default();
        input.apply(&mut model);

        let created = model.insert(db_pool.as_ref()).await.map_err(|e| {
            error!(error = %e, "Failed to insert warehouse");
            ServiceError::from(e)
        })?;

        counter!("inventory.warehouses.created", 1);
        info!(warehouse_id = created.id, "Warehouse created");
        event_sender
            .send_or_log(Event::WarehouseCreated(created.id))
            .await;

        Ok(created)
    }
}
