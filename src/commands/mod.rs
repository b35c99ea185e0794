use crate::{db::DbPool, errors::ServiceError, events::EventSender};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Command trait for implementing the Command Pattern
///
/// Each mutation is one object that validates its input, persists the change,
/// and publishes domain events once the write has committed.
#[async_trait]
pub trait Command: Send + Sync {
    /// The return type of the command when executed successfully
    type Result;

    /// Execute the command with the given dependencies
    ///
    /// # Arguments
    /// * `db_pool` - Database connection pool for persistence operations
    /// * `event_sender` - Channel to publish domain events
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError>;
}

/// Result of a delete command. Deleting an absent id is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResult {
    pub id: i32,
    /// `false` when nothing matched the id
    pub deleted: bool,
}

pub mod products;
pub mod shipments;
pub mod suppliers;
pub mod warehouses;
