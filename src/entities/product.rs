use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog product
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Price per unit, two fractional digits
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub unit_price: Decimal,
    pub category: Option<String>,
    /// Unique when present
    #[sea_orm(unique)]
    pub sku: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_warehouse::Entity")]
    ProductWarehouse,
    #[sea_orm(has_many = "super::shipment::Entity")]
    Shipment,
}

impl Related<super::product_warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductWarehouse.def()
    }
}

impl Related<super::shipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
