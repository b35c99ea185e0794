// Entity services
pub mod products;
pub mod shipments;
pub mod suppliers;
pub mod warehouses;

// Stock bookkeeping and read views
pub mod stock;
pub mod stock_ledger;
