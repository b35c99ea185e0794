pub mod common;
pub mod products;
pub mod shipments;
pub mod stock;
pub mod suppliers;
pub mod warehouses;

use crate::{
    db::DbPool,
    events::EventSender,
    services::{
        products::ProductService, shipments::ShipmentService, stock::StockService,
        stock_ledger::StockLedger, suppliers::SupplierService, warehouses::WarehouseService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductService>,
    pub warehouses: Arc<WarehouseService>,
    pub suppliers: Arc<SupplierService>,
    pub shipments: Arc<ShipmentService>,
    pub stock: Arc<StockService>,
}

impl AppServices {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        ledger: Arc<dyn StockLedger>,
        reconcile_stock_on_shipment_edit: bool,
    ) -> Self {
        Self {
            products: Arc::new(ProductService::new(db_pool.clone(), event_sender.clone())),
            warehouses: Arc::new(WarehouseService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            suppliers: Arc::new(SupplierService::new(db_pool.clone(), event_sender.clone())),
            shipments: Arc::new(ShipmentService::new(
                db_pool.clone(),
                event_sender,
                ledger,
                reconcile_stock_on_shipment_edit,
            )),
            stock: Arc::new(StockService::new(db_pool)),
        }
    }
}
