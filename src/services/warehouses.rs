use crate::{
    commands::{
        warehouses::{
            CreateWarehouseCommand, DeleteWarehouseCommand, UpdateWarehouseCommand,
            WarehouseInput,
        },
        Command, DeleteResult,
    },
    db::DbPool,
    entities::warehouse,
    errors::ServiceError,
    events::EventSender,
    services::stock::{warehouse_stock, StockView},
    PaginatedResponse,
};
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder};
use std::sync::Arc;
use tracing::instrument;

/// Service for managing warehouses
#[derive(Clone)]
pub struct WarehouseService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl WarehouseService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_warehouse(
        &self,
        input: WarehouseInput,
    ) -> Result<warehouse::Model, ServiceError> {
        CreateWarehouseCommand { input }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_warehouse(
        &self,
        id: i32,
        input: WarehouseInput,
    ) -> Result<warehouse::Model, ServiceError> {
        UpdateWarehouseCommand { id, input }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_warehouse(&self, id: i32) -> Result<DeleteResult, ServiceError> {
        DeleteWarehouseCommand { id }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_warehouse(&self, id: i32) -> Result<warehouse::Model, ServiceError> {
        warehouse::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {} not found", id)))
    }

    /// Warehouse plus the stock it holds.
    #[instrument(skip(self))]
    pub async fn get_warehouse_details(
        &self,
        id: i32,
    ) -> Result<(warehouse::Model, Vec<StockView>), ServiceError> {
        let warehouse = self.get_warehouse(id).await?;
        let stock = warehouse_stock(&*self.db_pool, id).await?;
        Ok((warehouse, stock))
    }

    #[instrument(skip(self))]
    pub async fn list_warehouses(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<warehouse::Model>, ServiceError> {
        let paginator = warehouse::Entity::find()
            .order_by_asc(warehouse::Column::Id)
            .paginate(&*self.db_pool, limit);

        let total = paginator.num_items().await?;
        let warehouses = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(PaginatedResponse::new(warehouses, total, page, limit))
    }
}
