#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use inventory_api::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::AppServices,
    services::stock_ledger::{StockLedger, StockLedgerUpdater},
    AppState,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Router plus state over a migrated and seeded SQLite file in a temp dir.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(|_| {}, Arc::new(StockLedgerUpdater)).await
    }

    pub async fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        Self::build(tweak, Arc::new(StockLedgerUpdater)).await
    }

    pub async fn with_ledger(ledger: Arc<dyn StockLedger>) -> Self {
        Self::build(|_| {}, ledger).await
    }

    async fn build(tweak: impl FnOnce(&mut AppConfig), ledger: Arc<dyn StockLedger>) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let db_path = dir.path().join("inventory_test.db");

        let mut cfg = AppConfig::new(format!("sqlite://{}?mode=rwc", db_path.display()), "test");
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        tweak(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(cfg.event_channel_capacity);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(
            db_arc.clone(),
            Arc::new(event_sender.clone()),
            ledger,
            cfg.reconcile_stock_on_shipment_edit,
        );
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };
        let router = inventory_api::build_router(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
            _dir: dir,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize request body"))
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("router error during test request")
    }

    /// Sends the request and returns the status with the parsed JSON body.
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (u16, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status().as_u16();
        (status, response_json(response).await)
    }

    /// Quantity of the stock row for the pair, `None` when no row exists.
    pub async fn stock_quantity(&self, product_id: i32, warehouse_id: i32) -> Option<i64> {
        let (status, body) = self
            .call(
                Method::GET,
                &format!("/api/v1/stock/{}/{}", product_id, warehouse_id),
                None,
            )
            .await;
        match status {
            200 => body["data"]["quantity"].as_i64(),
            404 => None,
            other => panic!("unexpected status {} for stock lookup: {}", other, body),
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// Money fields serialize as decimal strings.
pub fn money(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("not a money value: {}", other),
    }
}
