use crate::{
    commands::Command,
    db::DbPool,
    entities::product,
    errors::ServiceError,
    events::{Event, EventSender},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::ProductInput;

/// Full replacement of a product's writable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductCommand {
    pub id: i32,
    pub input: ProductInput,
}

#[async_trait]
impl Command for UpdateProductCommand {
    type Result = product::Model;

    #[instrument(skip(self, db_pool, event_sender), fields(product_id = self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let input = self.input.clone().normalized();
        input.validate()?;

        let db = db_pool.as_ref();
        let existing = product::Entity::find_by_id(self.id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", self.id)))?;

        let mut model: product::ActiveModel = existing.into();
        input.apply(&mut model);

        // A concurrent delete surfaces as RecordNotUpdated
        let updated = model.update(db).await.map_err(|e| {
            warn!(error = %e, "Product update failed");
            ServiceError::from(e)
        })?;

        info!("Product updated");
        event_sender
            .send_or_log(Event::ProductUpdated(updated.id))
            .await;

        Ok(updated)
    }
}
