pub mod create_supplier_command;
pub mod delete_supplier_command;
pub mod update_supplier_command;

pub use create_supplier_command::CreateSupplierCommand;
pub use delete_supplier_command::DeleteSupplierCommand;
pub use update_supplier_command::UpdateSupplierCommand;

use crate::{
    entities::supplier,
    validation::{normalize_optional, not_blank, PHONE_RE},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SupplierInput {
    #[validate(
        custom = "not_blank",
        length(max = 50, message = "Company name cannot exceed 50 characters")
    )]
    #[schema(example = "Tech Supplies Inc.")]
    pub company_name: String,

    /// Unique across suppliers
    #[validate(
        email(message = "Please enter a valid email address"),
        length(max = 100, message = "Email cannot exceed 100 characters")
    )]
    #[schema(example = "contact@techsupplies.com")]
    pub contact_email: String,

    #[serde(default)]
    #[validate(
        length(max = 15, message = "Phone number cannot exceed 15 characters"),
        regex(path = "PHONE_RE", message = "Please enter a valid phone number")
    )]
    #[schema(example = "+1-555-123-4567")]
    pub contact_phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100, message = "Address cannot exceed 100 characters"))]
    pub address: Option<String>,
}

impl SupplierInput {
    pub fn normalized(self) -> Self {
        Self {
            company_name: self.company_name.trim().to_string(),
            contact_email: self.contact_email.trim().to_string(),
            contact_phone: normalize_optional(self.contact_phone),
            address: normalize_optional(self.address),
        }
    }

    pub(crate) fn apply(self, model: &mut supplier::ActiveModel) {
        model.company_name = Set(self.company_name);
        model.contact_email = Set(self.contact_email);
        model.contact_phone = Set(self.contact_phone);
        model.address = Set(self.address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SupplierInput {
        SupplierInput {
            company_name: "Parts Direct".into(),
            contact_email: "sales@partsdirect.com".into(),
            contact_phone: Some("+1-555-000-1111".into()),
            address: None,
        }
    }

    #[test]
    fn valid_supplier_passes() {
        assert!(input().normalized().validate().is_ok());
    }

    #[test]
    fn malformed_contact_details_are_rejected() {
        let mut raw = input();
        raw.contact_email = "not-an-email".into();
        raw.contact_phone = Some("call reception".into());

        let errors = raw.normalized().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("contact_email"));
        assert!(fields.contains_key("contact_phone"));
    }

    #[test]
    fn blank_phone_is_treated_as_missing() {
        let mut raw = input();
        raw.contact_phone = Some(String::new());
        let normalized = raw.normalized();
        assert_eq!(normalized.contact_phone, None);
        assert!(normalized.validate().is_ok());
    }
}
