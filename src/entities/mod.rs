pub mod product;
pub mod product_warehouse;
pub mod shipment;
pub mod supplier;
pub mod warehouse;
