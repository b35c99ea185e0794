pub mod create_product_command;
pub mod delete_product_command;
pub mod update_product_command;

pub use create_product_command::CreateProductCommand;
pub use delete_product_command::DeleteProductCommand;
pub use update_product_command::UpdateProductCommand;

use crate::{
    entities::product,
    validation::{normalize_optional, not_blank, unit_price_in_range},
};
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Writable product fields, shared by create and update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(
        custom = "not_blank",
        length(max = 100, message = "Product name cannot exceed 100 characters")
    )]
    #[schema(example = "Laptop")]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 200, message = "Description cannot exceed 200 characters"))]
    pub description: Option<String>,

    #[validate(custom = "unit_price_in_range")]
    #[schema(example = "999.99")]
    pub unit_price: Decimal,

    #[serde(default)]
    #[validate(length(max = 50, message = "Category cannot exceed 50 characters"))]
    pub category: Option<String>,

    /// Unique across products when present
    #[serde(default)]
    #[validate(length(max = 20, message = "SKU cannot exceed 20 characters"))]
    #[schema(example = "LAP123")]
    pub sku: Option<String>,
}

impl ProductInput {
    /// Trims text, maps blank optionals to `None`, and rounds the price to cents.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: normalize_optional(self.description),
            unit_price: self.unit_price.round_dp(2),
            category: normalize_optional(self.category),
            sku: normalize_optional(self.sku),
        }
    }

    pub(crate) fn apply(self, model: &mut product::ActiveModel) {
        model.name = Set(self.name);
        model.description = Set(self.description);
        model.unit_price = Set(self.unit_price);
        model.category = Set(self.category);
        model.sku = Set(self.sku);
    }
}
