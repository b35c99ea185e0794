use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::SupplierInput;
use crate::{
    commands::Command,
    db::DbPool,
    entities::supplier,
    errors::ServiceError,
    events::{Event, EventSender},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSupplierCommand {
    pub id: i32,
    pub input: SupplierInput,
}

#[async_trait]
impl Command for UpdateSupplierCommand {
    type Result = supplier::Model;

    #[instrument(skip(self, db_pool, event_sender), fields(supplier_id = self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let input = self.input.clone().normalized();
        input.validate()?;

        let db = db_pool.as_ref();
        let existing = supplier::Entity::find_by_id(self.id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier {} not found", self.id)))?;

        let mut model: supplier::ActiveModel = existing.into();
        input.apply(&mut model);
        let updated = model.update(db).await?;

        info!("Supplier updated");
        event_sender
            .send_or_log(Event::SupplierUpdated(updated.id))
            .await;

        Ok(updated)
    }
}
