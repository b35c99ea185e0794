use async_trait::async_trait;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    commands::{Command, DeleteResult},
    db::DbPool,
    entities::supplier,
    errors::ServiceError,
    events::{Event, EventSender},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteSupplierCommand {
    pub id: i32,
}

#[async_trait]
impl Command for DeleteSupplierCommand {
    type Result = DeleteResult;

    #[instrument(skip(self, db_pool, event_sender), fields(supplier_id = self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let outcome = supplier::Entity::delete_by_id(self.id)
            .exec(db_pool.as_ref())
            .await?;

        let deleted = outcome.rows_affected > 0;
        if deleted {
            info!("Supplier deleted");
            event_sender.send_or_log(Event::SupplierDeleted(self.id)).await;
        }

        Ok(DeleteResult {
            id: self.id,
            deleted,
        })
    }
}
