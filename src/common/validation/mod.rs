// src/common/validation/mod.rs
//! Form validation shared by every admin endpoint.
//!
//! Validators are pure functions returning a [`ValidationResult`]; a form
//! validator composes them and combines the results before anything is
//! written to the database.

pub mod fields;
pub mod form;
pub mod order;
pub mod result;

pub use fields::{
    field_key, parse_date, parse_date_value, parse_leading_int, validate_date,
    validate_date_range, validate_email, validate_json, validate_max_length, validate_min_length,
    validate_positive_number, validate_required_fields, validate_url,
};
pub use form::{
    form_json_text, form_text, non_blank, split_comma_list, split_line_list, FormData, FormFields,
};
pub use order::{validate_order_field, OrderValidationContext, OrderValue, OrderedItem};
pub use result::{
    combine_validation_results, format_validation_errors, ValidationError, ValidationResult,
};

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_keeps_errors_from_invalid_results() {
        let r1 = ValidationResult::with_error("a", "x");
        let r2 = ValidationResult::new();

        let combined = combine_validation_results([r1, r2]);

        assert!(!combined.is_valid());
        assert_eq!(combined.len(), 1);
        assert_eq!(combined.get("a"), Some("x"));
    }

    #[test]
    fn test_combine_of_valid_results_is_valid() {
        let combined = combine_validation_results([ValidationResult::new(), ValidationResult::new()]);
        assert!(combined.is_valid());
        assert!(combined.is_empty());
    }

    #[test]
    fn test_combine_later_result_wins_on_same_field() {
        let combined = combine_validation_results([
            ValidationResult::with_error("order", "first"),
            ValidationResult::with_error("title", "title is required"),
            ValidationResult::with_error("order", "second"),
        ]);

        assert_eq!(combined.get("order"), Some("second"));
        let fields: Vec<&str> = combined.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["order", "title"]);
    }

    #[test]
    fn test_format_multiple_errors() {
        let mut result = ValidationResult::new();
        result.add_error("a", "A required");
        result.add_error("b", "B required");

        assert_eq!(
            format_validation_errors(result.errors()),
            "Please fix the following issues:\n• A required\n• B required"
        );
    }

    #[test]
    fn test_format_single_and_empty() {
        let single = ValidationResult::with_error("a", "A required");
        assert_eq!(single.message(), "A required");
        assert_eq!(ValidationResult::new().message(), "");
    }

    #[test]
    fn test_result_serializes_as_field_map() {
        let mut result = ValidationResult::new();
        result.add_error("title", "title is required");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["is_valid"], false);
        assert_eq!(json["errors"]["title"], "title is required");
        assert_eq!(result.fields_json()["title"], "title is required");
    }
}
