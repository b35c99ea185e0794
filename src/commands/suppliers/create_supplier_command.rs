use async_trait::async_trait;
use metrics::counter;
use sea_orm::ActiveModelTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
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
pub struct CreateSupplierCommand {
    pub input: SupplierInput,
}

#[async_trait]
impl Command for CreateSupplierCommand {
    type Result = supplier::Model;

    #[instrument(skip(self, db_pool, event_sender), fields(company = %self.input.company_name))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let input = self.input.clone().normalized();
        input.validate()?;

        let mut model = <supplier::ActiveModel as Default>::default();
        input.apply(&mut model);

        // Duplicate emails come back as ConstraintViolation
        let created = model.insert(db_pool.as_ref()).await.map_err(|e| {
            error!(error = %e, "Failed to insert supplier");
            ServiceError::from(e)
        })?;

        counter!("inventory.suppliers.created", 1);
        info!(supplier_id = created.id, "Supplier created");
        event_sender
            .send_or_log(Event::SupplierCreated(created.id))
            .await;

        Ok(created)
    }
}
