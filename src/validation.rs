//! Field validators shared by the command inputs.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

pub const MIN_UNIT_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(500_000, 0, 0, false, 2);

lazy_static! {
    /// Digits with optional leading `+` and the usual separators.
    pub static ref PHONE_RE: Regex =
        Regex::new(r"^\+?[0-9(][0-9 ().\-]*[0-9]$").expect("phone regex is valid");
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required"));
    }
    Ok(())
}

pub fn unit_price_in_range(price: &Decimal) -> Result<(), ValidationError> {
    if *price < MIN_UNIT_PRICE || *price > MAX_UNIT_PRICE {
        return Err(error(
            "range",
            "Unit price must be between 0.01 and 5000.00",
        ));
    }
    Ok(())
}

pub fn non_negative_money(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        return Err(error("range", "Total cost must be non-negative"));
    }
    Ok(())
}

/// Maps blank optional strings to `None` and trims the rest.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("", false)]
    #[case("   ", false)]
    #[case("\t\n", false)]
    #[case("Laptop", true)]
    #[case(" x ", true)]
    fn not_blank_rejects_whitespace(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(not_blank(input).is_ok(), ok);
    }

    #[rstest]
    #[case(dec!(0.00), false)]
    #[case(dec!(0.01), true)]
    #[case(dec!(999.99), true)]
    #[case(dec!(5000.00), true)]
    #[case(dec!(5000.01), false)]
    #[case(dec!(-1), false)]
    fn unit_price_bounds_are_inclusive(#[case] price: Decimal, #[case] ok: bool) {
        assert_eq!(unit_price_in_range(&price).is_ok(), ok);
    }

    #[rstest]
    #[case("+1-555-123-4567", true)]
    #[case("(555) 987-6543", true)]
    #[case("555.456.7890", true)]
    #[case("call me", false)]
    #[case("+", false)]
    #[case("12-", false)]
    fn phone_pattern(#[case] phone: &str, #[case] ok: bool) {
        assert_eq!(PHONE_RE.is_match(phone), ok);
    }

    #[test]
    fn money_must_not_be_negative() {
        assert!(non_negative_money(&dec!(0)).is_ok());
        assert!(non_negative_money(&dec!(19999.80)).is_ok());
        assert!(non_negative_money(&dec!(-0.01)).is_err());
    }

    #[test]
    fn blank_optionals_collapse_to_none() {
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(normalize_optional(Some(" LAP123 ".into())), Some("LAP123".into()));
        assert_eq!(normalize_optional(None), None);
    }
}
