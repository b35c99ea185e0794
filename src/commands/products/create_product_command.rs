use crate::{
    commands::Command,
    db::DbPool,
    entities::product,
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

use super::ProductInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductCommand {
    pub input: ProductInput,
}

#[async_trait]
impl Command for CreateProductCommand {
    type Result = product::Model;

    #[instrument(skip(self, db_pool, event_sender), fields(name = %self.input.name))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let input = self.input.clone().normalized();
        input.validate()?;

        let mut model = <product::ActiveModel as Default>::default();
        input.apply(&mut model);

        let created = model.insert(db_pool.as_ref()).await.map_err(|e| {
            error!(error = %e, "Failed to insert product");
            ServiceError::from(e)
        })?;

        counter!("inventory.products.created", 1);
        info!(product_id = created.id, "Product created");
        event_sender
            .send_or_log(Event::ProductCreated(created.id))
            .await;

        Ok(created)
    }
}
