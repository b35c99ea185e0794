/*!
 * Transaction helper
 *
 * Wraps sea-orm transactions with logging and metrics while keeping the
 * caller's `ServiceError` intact.
 */

use crate::errors::ServiceError;
use futures::future::BoxFuture;
use metrics::{counter, histogram};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};
use uuid::Uuid;

/// Execute `f` inside one database transaction.
///
/// Commits when `f` returns `Ok`, rolls back otherwise. Errors raised inside
/// the closure come back unchanged; connection failures are classified through
/// `From<DbErr>`.
///
/// ```rust,ignore
/// let shipment = with_transaction(&db, "create_shipment", move |txn| {
///     Box::pin(async move {
///         let shipment = active.insert(txn).await?;
///         ledger.apply_shipment(txn, product_id, warehouse_id, quantity).await?;
///         Ok(shipment)
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<F, T>(
    db: &DatabaseConnection,
    operation: &'static str,
    f: F,
) -> Result<T, ServiceError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, ServiceError>> + Send,
    T: Send,
{
    let transaction_id = Uuid::new_v4();
    let start = std::time::Instant::now();

    debug!(transaction_id = %transaction_id, operation, "Starting database transaction");
    counter!("inventory_db.transaction.started", 1, "operation" => operation);

    let result = db.transaction::<_, T, ServiceError>(f).await;

    let elapsed = start.elapsed();
    histogram!("inventory_db.transaction.duration", elapsed, "operation" => operation);

    match &result {
        Ok(_) => {
            counter!("inventory_db.transaction.committed", 1, "operation" => operation);
            debug!(transaction_id = %transaction_id, operation, "Transaction committed in {:?}", elapsed);
        }
        Err(e) => {
            counter!("inventory_db.transaction.rolled_back", 1, "operation" => operation);
            warn!(transaction_id = %transaction_id, operation, error = %e, "Transaction rolled back after {:?}", elapsed);
        }
    }

    result.map_err(ServiceError::from)
}
