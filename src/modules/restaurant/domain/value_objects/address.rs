use serde::{Deserialize, Serialize};

use crate::shared::validation::{Rules, Validate, ValidationResult};

pub const STREET_MAX_LEN: usize = 50;
pub const CITY_MAX_LEN: usize = 100;
pub const STATE_LEN: usize = 2;
pub const POSTAL_CODE_LEN: usize = 8;

/// Structured street address. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: String,
    city: String,
    state: String,
    postal_code: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        number: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            number: number.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
        }
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

impl Validate for Address {
    fn validate(&self) -> ValidationResult {
        let result = ValidationResult::valid();
        let result = Rules::required_max_len(result, "street", "Street", &self.street, STREET_MAX_LEN);
        let result = Rules::required(result, "number", "Number", &self.number);
        let result = Rules::required_max_len(result, "city", "City", &self.city, CITY_MAX_LEN);
        let result = Rules::required_exact_len(result, "state", "State", &self.state, STATE_LEN);
        Rules::required_exact_len(
            result,
            "postal_code",
            "Postal code",
            &self.postal_code,
            POSTAL_CODE_LEN,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_address() -> Address {
        Address::new("Avenida Paulista", "1578", "São Paulo", "SP", "01310200")
    }

    #[test]
    fn test_valid_address() {
        assert!(valid_address().validate().is_valid());
    }

    #[test]
    fn test_any_single_empty_field_is_invalid() {
        let cases = [
            ("street", Address::new("", "1", "City", "SP", "01310200")),
            ("number", Address::new("Street", " ", "City", "SP", "01310200")),
            ("city", Address::new("Street", "1", "", "SP", "01310200")),
            ("state", Address::new("Street", "1", "City", "", "01310200")),
            ("postal_code", Address::new("Street", "1", "City", "SP", "")),
        ];

        for (field, address) in cases {
            let result = address.validate();
            assert!(!result.is_valid(), "{} should be required", field);
            assert!(result.errors().iter().any(|e| e.field == field));
        }
    }

    #[test]
    fn test_all_violations_reported_together() {
        let address = Address::new("", "1", &"x".repeat(101), "SPX", "123");
        let errors = address.validate().into_result().unwrap_err();

        assert_eq!(errors.len(), 4);
        assert!(errors.has_field("street"));
        assert!(errors.has_field("city"));
        assert!(errors.has_field("state"));
        assert!(errors.has_field("postal_code"));
    }

    #[test]
    fn test_length_bounds() {
        let at_limit = Address::new("s".repeat(50), "1", "c".repeat(100), "RJ", "20040002");
        assert!(at_limit.validate().is_valid());

        let street_too_long = Address::new("s".repeat(51), "1", "City", "RJ", "20040002");
        let errors = street_too_long.validate().into_result().unwrap_err();
        assert_eq!(errors.messages(), vec!["Street can have at most 50 characters"]);

        let short_state = Address::new("Street", "1", "City", "R", "20040002");
        let errors = short_state.validate().into_result().unwrap_err();
        assert_eq!(errors.messages(), vec!["State must have 2 characters"]);
    }

    #[test]
    fn test_long_descriptive_number_is_accepted() {
        let address = Address::new("Rua A", "Km 23,5 Bloco B Sala 1204", "Recife", "PE", "50000000");
        assert!(address.validate().is_valid());
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let address = Address::new("   ", "1", "City", "RJ", "20040002");
        let errors = address.validate().into_result().unwrap_err();
        assert_eq!(errors.messages(), vec!["Street cannot be empty"]);
    }
}
