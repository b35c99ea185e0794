use crate::{
    commands::Command,
    db::DbPool,
    entities::warehouse,
    errors::ServiceError,
    events::{Event, EventSender},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::WarehouseInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWarehouseCommand {
    pub id: i32,
    pub input: WarehouseInput,
}

#[async_trait]
impl Command for UpdateWarehouseCommand {
    type Result = warehouse::Model;

    #[instrument(skip(self, db_pool, event_sender), fields(warehouse_id = self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let input = self.input.clone().normalized();
        input.validate()?;

        let db = db_pool.as_ref();
        let existing = warehouse::Entity::find_by_id(self.id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {} not found", self.id)))?;

        let mut model: warehouse::ActiveModel = existing.into();
        input.apply(&mut model);
        let updated = model.update(db).await?;

        info!("Warehouse updated");
        event_sender
            .send_or_log(Event::WarehouseUpdated(updated.id))
            .await;

        Ok(updated)
    }
}
