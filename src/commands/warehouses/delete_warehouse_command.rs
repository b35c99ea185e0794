use crate::{
    commands::{Command, DeleteResult},
    db::DbPool,
    entities::warehouse,
    errors::ServiceError,
    events::{Event, EventSender},
};
use async_trait::async_trait;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteWarehouseCommand {
    pub id: i32,
}

#[async_trait]
impl Command for DeleteWarehouseCommand {
    type Result = DeleteResult;

    #[instrument(skip(self, db_pool, event_sender), fields(warehouse_id = self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let outcome = warehouse::Entity::delete_by_id(self.id)
            .exec(db_pool.as_ref())
            .await?;

        let deleted = outcome.rows_affected > 0;
        if deleted {
            info!("Warehouse deleted");
            event_sender
                .send_or_log(Event::WarehouseDeleted(self.id))
                .await;
        }

        Ok(DeleteResult {
            id: self.id,
            deleted,
        })
    }
}
