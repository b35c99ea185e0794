use crate::{
    commands::{
        suppliers::{
            CreateSupplierCommand, DeleteSupplierCommand, SupplierInput, UpdateSupplierCommand,
        },
        Command, DeleteResult,
    },
    db::DbPool,
    entities::supplier,
    errors::ServiceError,
    events::EventSender,
    PaginatedResponse,
};
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder};
use std::sync::Arc;
use tracing::instrument;

/// Service for managing suppliers
#[derive(Clone)]
pub struct SupplierService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl SupplierService {
    /// Creates a new supplier service instance
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new supplier
    #[instrument(skip(self, input))]
    pub async fn create_supplier(
        &self,
        input: SupplierInput,
    ) -> Result<supplier::Model, ServiceError> {
        CreateSupplierCommand { input }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Updates an existing supplier
    #[instrument(skip(self, input))]
    pub async fn update_supplier(
        &self,
        id: i32,
        input: SupplierInput,
    ) -> Result<supplier::Model, ServiceError> {
        UpdateSupplierCommand { id, input }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Deletes a supplier
    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, id: i32) -> Result<DeleteResult, ServiceError> {
        DeleteSupplierCommand { id }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Gets a supplier by ID
    #[instrument(skip(self))]
    pub async fn get_supplier(&self, id: i32) -> Result<supplier::Model, ServiceError> {
        supplier::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier {} not found", id)))
    }

    /// Lists all suppliers
    #[instrument(skip(self))]
    pub async fn list_suppliers(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<supplier::Model>, ServiceError> {
        let paginator = supplier::Entity::find()
            .order_by_asc(supplier::Column::Id)
            .paginate(&*self.db_pool, limit);

        let total = paginator.num_items().await?;
        let suppliers = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(PaginatedResponse::new(suppliers, total, page, limit))
    }
}
