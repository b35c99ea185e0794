use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = r#"
# Inventory API

Tracks products, warehouses, suppliers, per-warehouse stock levels, and
inbound shipments.

Recording a shipment prices it from the product's unit price and adds its
quantity to the matching stock row in the same transaction.

## Pagination

List endpoints accept `page` (default 1) and `limit` (default 20, max 100).

## Errors

Failures return an `ErrorResponse`; validation failures carry per-field
messages in `field_errors`.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "warehouses", description = "Warehouses and their stock"),
        (name = "suppliers", description = "Suppliers"),
        (name = "shipments", description = "Inbound shipments; creating one updates stock"),
        (name = "stock", description = "Read-only stock levels")
    ),
    paths(
        // Products
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::products::get_product_stock,

        // Warehouses
        crate::handlers::warehouses::list_warehouses,
        crate::handlers::warehouses::get_warehouse,
        crate::handlers::warehouses::create_warehouse,
        crate::handlers::warehouses::update_warehouse,
        crate::handlers::warehouses::delete_warehouse,
        crate::handlers::warehouses::get_warehouse_stock,

        // Suppliers
        crate::handlers::suppliers::list_suppliers,
        crate::handlers::suppliers::get_supplier,
        crate::handlers::suppliers::create_supplier,
        crate::handlers::suppliers::update_supplier,
        crate::handlers::suppliers::delete_supplier,

        // Shipments
        crate::handlers::shipments::list_shipments,
        crate::handlers::shipments::get_shipment,
        crate::handlers::shipments::create_shipment,
        crate::handlers::shipments::update_shipment,
        crate::handlers::shipments::delete_shipment,

        // Stock
        crate::handlers::stock::list_stock,
        crate::handlers::stock::get_stock,
    ),
    components(
        schemas(
            crate::commands::products::ProductInput,
            crate::commands::warehouses::WarehouseInput,
            crate::commands::suppliers::SupplierInput,
            crate::commands::shipments::ShipmentInput,
            crate::commands::DeleteResult,
            crate::services::stock::StockView,
            crate::services::shipments::ShipmentDetails,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDocV1::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let json = serde_json::to_string(&ApiDocV1::openapi()).unwrap();
        assert!(json.contains("Inventory API"));
        for path in [
            "/api/v1/products",
            "/api/v1/warehouses/{id}/stock",
            "/api/v1/suppliers",
            "/api/v1/shipments/{id}",
            "/api/v1/stock/{product_id}/{warehouse_id}",
        ] {
            assert!(json.contains(path), "missing {}", path);
        }
        assert!(json.contains("ShipmentInput"));
    }
}
