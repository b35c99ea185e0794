use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event after the write it describes has committed. A closed
    /// channel is logged and otherwise ignored.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Event not delivered: {}", e);
        }
    }
}

/// Domain events emitted after successful writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ProductCreated(i32),
    ProductUpdated(i32),
    ProductDeleted(i32),

    WarehouseCreated(i32),
    WarehouseUpdated(i32),
    WarehouseDeleted(i32),

    SupplierCreated(i32),
    SupplierUpdated(i32),
    SupplierDeleted(i32),

    ShipmentCreated {
        shipment_id: i32,
        product_id: i32,
        warehouse_id: i32,
        quantity: i32,
    },
    ShipmentUpdated(i32),
    ShipmentDeleted(i32),

    /// A stock row changed; `old_quantity` is `None` when the row was created.
    StockAdjusted {
        product_id: i32,
        warehouse_id: i32,
        old_quantity: Option<i32>,
        new_quantity: i32,
    },
}

impl Event {
    /// Short name used as the `event` field in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Event::ProductCreated(_) => "product.created",
            Event::ProductUpdated(_) => "product.updated",
            Event::ProductDeleted(_) => "product.deleted",
            Event::WarehouseCreated(_) => "warehouse.created",
            Event::WarehouseUpdated(_) => "warehouse.updated",
            Event::WarehouseDeleted(_) => "warehouse.deleted",
            Event::SupplierCreated(_) => "supplier.created",
            Event::SupplierUpdated(_) => "supplier.updated",
            Event::SupplierDeleted(_) => "supplier.deleted",
            Event::ShipmentCreated { .. } => "shipment.created",
            Event::ShipmentUpdated(_) => "shipment.updated",
            Event::ShipmentDeleted(_) => "shipment.deleted",
            Event::StockAdjusted { .. } => "stock.adjusted",
        }
    }
}

/// Drains the event channel until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::ShipmentCreated {
                shipment_id,
                product_id,
                warehouse_id,
                quantity,
            } => {
                info!(
                    event = event.name(),
                    shipment_id,
                    product_id,
                    warehouse_id,
                    quantity,
                    "Shipment received"
                );
            }
            Event::StockAdjusted {
                product_id,
                warehouse_id,
                old_quantity,
                new_quantity,
            } => {
                info!(
                    event = event.name(),
                    product_id,
                    warehouse_id,
                    old_quantity = ?old_quantity,
                    new_quantity,
                    "Stock level changed"
                );
            }
            other => {
                info!(event = other.name(), payload = ?other, "Received event");
            }
        }
    }

    info!("Event channel closed; event processing loop finished");
}
