use crate::{
    commands::{Command, DeleteResult},
    db::DbPool,
    entities::product,
    errors::ServiceError,
    events::{Event, EventSender},
};
use async_trait::async_trait;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Deletes a product and, through the cascade, its stock rows.
/// Refused while shipments still reference the product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteProductCommand {
    pub id: i32,
}

#[async_trait]
impl Command for DeleteProductCommand {
    type Result = DeleteResult;

    #[instrument(skip(self, db_pool, event_sender), fields(product_id = self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let outcome = product::Entity::delete_by_id(self.id)
            .exec(db_pool.as_ref())
            .await?;

        let deleted = outcome.rows_affected > 0;
        if deleted {
            info!("Product deleted");
            event_sender.send_or_log(Event::ProductDeleted(self.id)).await;
        } else {
            info!("Product already absent");
        }

        Ok(DeleteResult {
            id: self.id,
            deleted,
        })
    }
}
