pub mod create_warehouse_command;
pub mod delete_warehouse_command;
pub mod update_warehouse_command;

pub use create_warehouse_command::CreateWarehouseCommand;
pub use delete_warehouse_command::DeleteWarehouseCommand;
pub use update_warehouse_command::UpdateWarehouseCommand;

use crate::{entities::warehouse, validation::not_blank};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WarehouseInput {
    #[validate(
        custom = "not_blank",
        length(max = 50, message = "Warehouse name cannot exceed 50 characters")
    )]
    #[schema(example = "Main Warehouse")]
    pub name: String,

    #[validate(
        custom = "not_blank",
        length(max = 100, message = "Location cannot exceed 100 characters")
    )]
    #[schema(example = "123 Industrial Rd, City")]
    pub location: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Storage capacity must be non-negative"))]
    #[schema(example = 10000)]
    pub storage_capacity: i32,
}

impl WarehouseInput {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            storage_capacity: self.storage_capacity,
        }
    }

    pub(crate) fn apply(self, model: &mut warehouse::ActiveModel) {
        model.name = Set(self.name);
        model.location = Set(self.location);
        model.storage_capacity = Set(self.storage_capacity);
    }
}
