use super::validation_chain::ValidationResult;

/// Reusable field rules. Each one takes the accumulator and returns it with
/// any violation appended, so rules chain without short-circuiting.
pub struct Rules;

impl Rules {
    /// Blank (empty or whitespace-only) values count as empty
    pub fn is_blank(value: &str) -> bool {
        value.trim().is_empty()
    }

    /// Length in characters, not bytes
    pub fn char_len(value: &str) -> usize {
        value.chars().count()
    }

    /// Value must be present and at most `max` characters long
    pub fn required_max_len(
        result: ValidationResult,
        field: &str,
        label: &str,
        value: &str,
        max: usize,
    ) -> ValidationResult {
        if Self::is_blank(value) {
            return result.with_error(field, format!("{} cannot be empty", label));
        }

        result.check(
            Self::char_len(value) <= max,
            field,
            format!("{} can have at most {} characters", label, max),
        )
    }

    /// Value must be present and exactly `len` characters long
    pub fn required_exact_len(
        result: ValidationResult,
        field: &str,
        label: &str,
        value: &str,
        len: usize,
    ) -> ValidationResult {
        if Self::is_blank(value) {
            return result.with_error(field, format!("{} cannot be empty", label));
        }

        result.check(
            Self::char_len(value) == len,
            field,
            format!("{} must have {} characters", label, len),
        )
    }

    /// Value must be present; no length bound
    pub fn required(
        result: ValidationResult,
        field: &str,
        label: &str,
        value: &str,
    ) -> ValidationResult {
        result.check(
            !Self::is_blank(value),
            field,
            format!("{} cannot be empty", label),
        )
    }

    /// `min < value <= max`
    pub fn greater_than_at_most(
        result: ValidationResult,
        field: &str,
        label: &str,
        value: i32,
        min: i32,
        max: i32,
    ) -> ValidationResult {
        result
            .check(
                value > min,
                field,
                format!("{} must be greater than {}", label, min),
            )
            .check(
                value <= max,
                field,
                format!("{} must be less than or equal to {}", label, max),
            )
    }
}
