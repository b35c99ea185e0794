//! Read-only views over the `product_warehouses` table.

use crate::{
    db::DbPool,
    entities::{product, product_warehouse, warehouse},
    errors::ServiceError,
    PaginatedResponse,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// A stock row with the names of its product and warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockView {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub warehouse_id: i32,
    pub warehouse_name: String,
    pub quantity: i32,
    pub last_updated: DateTime<Utc>,
}

/// Attaches product and warehouse names to stock rows with two batched lookups.
pub(crate) async fn attach_names<C: ConnectionTrait>(
    db: &C,
    rows: Vec<product_warehouse::Model>,
) -> Result<Vec<StockView>, ServiceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = rows.iter().map(|r| r.product_id).collect();
    let warehouse_ids: Vec<i32> = rows.iter().map(|r| r.warehouse_id).collect();

    let products: HashMap<i32, String> = product::Entity::find()
        .filter(product::Column::Id.is_in(product_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();
    let warehouses: HashMap<i32, String> = warehouse::Entity::find()
        .filter(warehouse::Column::Id.is_in(warehouse_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| StockView {
            id: row.id,
            product_name: products.get(&row.product_id).cloned().unwrap_or_default(),
            warehouse_name: warehouses
                .get(&row.warehouse_id)
                .cloned()
                .unwrap_or_default(),
            product_id: row.product_id,
            warehouse_id: row.warehouse_id,
            quantity: row.quantity,
            last_updated: row.last_updated,
        })
        .collect())
}

/// Service for stock level queries
#[derive(Clone)]
pub struct StockService {
    db_pool: Arc<DbPool>,
}

impl StockService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list_stock(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<StockView>, ServiceError> {
        let db = &*self.db_pool;
        let paginator = product_warehouse::Entity::find()
            .order_by_asc(product_warehouse::Column::ProductId)
            .order_by_asc(product_warehouse::Column::WarehouseId)
            .paginate(db, limit);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        let items = attach_names(db, rows).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    /// Stock row for one (product, warehouse) pair.
    #[instrument(skip(self))]
    pub async fn get_stock(
        &self,
        product_id: i32,
        warehouse_id: i32,
    ) -> Result<StockView, ServiceError> {
        let db = &*self.db_pool;
        let row = product_warehouse::Entity::find()
            .filter(product_warehouse::Column::ProductId.eq(product_id))
            .filter(product_warehouse::Column::WarehouseId.eq(warehouse_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "No stock for product {} in warehouse {}",
                    product_id, warehouse_id
                ))
            })?;

        attach_names(db, vec![row])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::InternalError("stock view lost its row".into()))
    }

    #[instrument(skip(self))]
    pub async fn stock_for_product(&self, product_id: i32) -> Result<Vec<StockView>, ServiceError> {
        let db = &*self.db_pool;
        product::Entity::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

        product_stock(db, product_id).await
    }

    #[instrument(skip(self))]
    pub async fn stock_for_warehouse(
        &self,
        warehouse_id: i32,
    ) -> Result<Vec<StockView>, ServiceError> {
        let db = &*self.db_pool;
        warehouse::Entity::find_by_id(warehouse_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Warehouse {} not found", warehouse_id))
            })?;

        warehouse_stock(db, warehouse_id).await
    }
}

pub(crate) async fn product_stock<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
) -> Result<Vec<StockView>, ServiceError> {
    let rows = product_warehouse::Entity::find()
        .filter(product_warehouse::Column::ProductId.eq(product_id))
        .order_by_asc(product_warehouse::Column::WarehouseId)
        .all(db)
        .await?;
    attach_names(db, rows).await
}

pub(crate) async fn warehouse_stock<C: ConnectionTrait>(
    db: &C,
    warehouse_id: i32,
) -> Result<Vec<StockView>, ServiceError> {
    let rows = product_warehouse::Entity::find()
        .filter(product_warehouse::Column::WarehouseId.eq(warehouse_id))
        .order_by_asc(product_warehouse::Column::ProductId)
        .all(db)
        .await?;
    attach_names(db, rows).await
}
