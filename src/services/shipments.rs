use crate::{
    commands::{
        shipments::{
            CreateShipmentCommand, DeleteShipmentCommand, ShipmentInput, ShipmentReceipt,
            UpdateShipmentCommand,
        },
        Command, DeleteResult,
    },
    db::DbPool,
    entities::{product, shipment, supplier, warehouse},
    errors::ServiceError,
    events::EventSender,
    services::stock_ledger::StockLedger,
    PaginatedResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// A shipment with the names of its supplier, product, and warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShipmentDetails {
    pub id: i32,
    pub supplier_id: i32,
    pub supplier_name: Option<String>,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub warehouse_id: i32,
    pub warehouse_name: Option<String>,
    pub quantity: i32,
    pub shipment_date: DateTime<Utc>,
    #[schema(example = "19999.80")]
    pub total_cost: Decimal,
}

/// Service for recording and querying shipments
#[derive(Clone)]
pub struct ShipmentService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    ledger: Arc<dyn StockLedger>,
    reconcile_on_edit: bool,
}

impl ShipmentService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        ledger: Arc<dyn StockLedger>,
        reconcile_on_edit: bool,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            ledger,
            reconcile_on_edit,
        }
    }

    /// Records a shipment and books its quantity into stock.
    #[instrument(skip(self, input))]
    pub async fn create_shipment(
        &self,
        input: ShipmentInput,
    ) -> Result<ShipmentReceipt, ServiceError> {
        CreateShipmentCommand { input }
            .execute_with_ledger(
                self.db_pool.clone(),
                self.event_sender.clone(),
                self.ledger.clone(),
            )
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_shipment(
        &self,
        id: i32,
        input: ShipmentInput,
    ) -> Result<shipment::Model, ServiceError> {
        UpdateShipmentCommand {
            id,
            input,
            reconcile_stock: self.reconcile_on_edit,
        }
        .execute_with_ledger(
            self.db_pool.clone(),
            self.event_sender.clone(),
            self.ledger.clone(),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_shipment(&self, id: i32) -> Result<DeleteResult, ServiceError> {
        DeleteShipmentCommand { id }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_shipment(&self, id: i32) -> Result<ShipmentDetails, ServiceError> {
        let shipment = shipment::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Shipment {} not found", id)))?;

        self.with_names(vec![shipment])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::InternalError("shipment view lost its row".into()))
    }

    /// Most recent shipments first.
    #[instrument(skip(self))]
    pub async fn list_shipments(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<ShipmentDetails>, ServiceError> {
        let paginator = shipment::Entity::find()
            .order_by_desc(shipment::Column::ShipmentDate)
            .order_by_desc(shipment::Column::Id)
            .paginate(&*self.db_pool, limit);

        let total = paginator.num_items().await?;
        let shipments = paginator.fetch_page(page.saturating_sub(1)).await?;
        let items = self.with_names(shipments).await?;

        info!(total, page, limit, returned = items.len(), "Shipments listed");
        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    async fn with_names(
        &self,
        shipments: Vec<shipment::Model>,
    ) -> Result<Vec<ShipmentDetails>, ServiceError> {
        if shipments.is_empty() {
            return Ok(Vec::new());
        }
        let db = &*self.db_pool;

        let supplier_ids: Vec<i32> = shipments.iter().map(|s| s.supplier_id).collect();
        let product_ids: Vec<i32> = shipments.iter().map(|s| s.product_id).collect();
        let warehouse_ids: Vec<i32> = shipments.iter().map(|s| s.warehouse_id).collect();

        let suppliers: HashMap<i32, String> = supplier::Entity::find()
            .filter(supplier::Column::Id.is_in(supplier_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.company_name))
            .collect();
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

        Ok(shipments
            .into_iter()
            .map(|s| ShipmentDetails {
                id: s.id,
                supplier_name: suppliers.get(&s.supplier_id).cloned(),
                product_name: products.get(&s.product_id).cloned(),
                warehouse_name: warehouses.get(&s.warehouse_id).cloned(),
                supplier_id: s.supplier_id,
                product_id: s.product_id,
                warehouse_id: s.warehouse_id,
                quantity: s.quantity,
                shipment_date: s.shipment_date,
                total_cost: s.total_cost.round_dp(2),
            })
            .collect())
    }
}
