use crate::{
    commands::{
        products::{CreateProductCommand, DeleteProductCommand, ProductInput, UpdateProductCommand},
        Command, DeleteResult,
    },
    db::DbPool,
    entities::product,
    errors::ServiceError,
    events::EventSender,
    services::stock::{product_stock, StockView},
    PaginatedResponse,
};
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder};
use std::sync::Arc;
use tracing::{info, instrument};

/// Service for managing products
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: ProductInput) -> Result<product::Model, ServiceError> {
        CreateProductCommand { input }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: i32,
        input: ProductInput,
    ) -> Result<product::Model, ServiceError> {
        UpdateProductCommand { id, input }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<DeleteResult, ServiceError> {
        DeleteProductCommand { id }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> Result<product::Model, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))
    }

    /// Product plus its stock rows across warehouses.
    #[instrument(skip(self))]
    pub async fn get_product_details(
        &self,
        id: i32,
    ) -> Result<(product::Model, Vec<StockView>), ServiceError> {
        let product = self.get_product(id).await?;
        let stock = product_stock(&*self.db_pool, id).await?;
        Ok((product, stock))
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<product::Model>, ServiceError> {
        let paginator = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .paginate(&*self.db_pool, limit);

        let total = paginator.num_items().await?;
        let products = paginator.fetch_page(page.saturating_sub(1)).await?;

        info!(total, page, limit, returned = products.len(), "Products listed");
        Ok(PaginatedResponse::new(products, total, page, limit))
    }
}
