//! Field validation shared by every domain value.
//!
//! Validation is a pure function of the value being checked: rules append to
//! an explicit [`ValidationResult`] accumulator which is returned once.

pub mod validation_chain;
pub mod validation_rules;

pub use validation_chain::{validate, FieldError, Validate, ValidationErrors, ValidationResult};
pub use validation_rules::Rules;
