// src/common/validation/fields.rs
//! Single-concern field validators.
//!
//! Every validator except `validate_required_fields` lets an empty value
//! through: whether a field must be filled in is checked separately.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

use super::form::FormFields;
use super::result::ValidationResult;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Error key for a display name: "Image URL" -> "image_url"
pub fn field_key(field_name: &str) -> String {
    field_name.to_lowercase().replace(' ', "_")
}

/// Parses the leading integer of `value`.
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit, and `None` means no digits were found. "12px" is 12,
/// "3.9" is 3 and "abc" is `None`. Out-of-range values saturate.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses a calendar date or timestamp for ordering comparisons
pub fn parse_date_value(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Parses a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Fails for every listed field that is missing or blank
pub fn validate_required_fields<F>(data: &F, fields: &[&str]) -> ValidationResult
where
    F: FormFields + ?Sized,
{
    let mut result = ValidationResult::new();

    for field in fields {
        let filled = data
            .field(field)
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false);
        if !filled {
            result.add_error(field, format!("{} is required", field.replacen('_', " ", 1)));
        }
    }

    result
}

pub fn validate_email(email: &str) -> ValidationResult {
    if !email.is_empty() && !email_regex().is_match(email) {
        return ValidationResult::with_error("email", "Please enter a valid email address");
    }
    ValidationResult::new()
}

/// Fails when a non-blank value is not an absolute URL
pub fn validate_url(url: &str, field_name: &str) -> ValidationResult {
    if !url.trim().is_empty() && reqwest::Url::parse(url).is_err() {
        return ValidationResult::with_error(
            &field_key(field_name),
            format!("{} must be a valid URL", field_name),
        );
    }
    ValidationResult::new()
}

pub fn validate_json(json: &str, field_name: &str) -> ValidationResult {
    if !json.trim().is_empty() && serde_json::from_str::<serde_json::Value>(json).is_err() {
        return ValidationResult::with_error(
            &field_key(field_name),
            format!("{} must be valid JSON format", field_name),
        );
    }
    ValidationResult::new()
}

/// Zero counts as positive here: only non-numbers and negatives fail
pub fn validate_positive_number(value: &str, field_name: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::new();
    }
    match parse_leading_int(value) {
        Some(number) if number >= 0 => ValidationResult::new(),
        _ => ValidationResult::with_error(
            &field_key(field_name),
            format!("{} must be a positive number", field_name),
        ),
    }
}

/// Fails on `end_date` when both dates are given and start is after end.
///
/// Values that do not parse as dates are not compared.
pub fn validate_date_range(start_date: &str, end_date: &str) -> ValidationResult {
    if start_date.trim().is_empty() || end_date.trim().is_empty() {
        return ValidationResult::new();
    }

    if let (Some(start), Some(end)) = (parse_date_value(start_date), parse_date_value(end_date)) {
        if start > end {
            return ValidationResult::with_error("end_date", "End date cannot be before start date");
        }
    }

    ValidationResult::new()
}

/// Non-blank values must be `YYYY-MM-DD`
pub fn validate_date(value: &str, field_name: &str) -> ValidationResult {
    if !value.trim().is_empty() && parse_date(value).is_none() {
        return ValidationResult::with_error(
            &field_key(field_name),
            format!("{} must be in YYYY-MM-DD format", field_name),
        );
    }
    ValidationResult::new()
}

pub fn validate_max_length(value: &str, field_name: &str, max: usize) -> ValidationResult {
    if value.chars().count() > max {
        return ValidationResult::with_error(
            &field_key(field_name),
            format!("{} must be at most {} characters", field_name, max),
        );
    }
    ValidationResult::new()
}

pub fn validate_min_length(value: &str, field_name: &str, min: usize) -> ValidationResult {
    if !value.trim().is_empty() && value.trim().chars().count() < min {
        return ValidationResult::with_error(
            &field_key(field_name),
            format!("{} must be at least {} characters", field_name, min),
        );
    }
    ValidationResult::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::validation::FormData;

    #[test]
    fn test_required_fields_flags_blank_only() {
        let data = FormData::from_pairs([("title", ""), ("name", "x")]);
        let result = validate_required_fields(&data, &["title", "name"]);

        assert!(!result.is_valid());
        assert!(result.contains("title"));
        assert!(!result.contains("name"));
    }

    #[test]
    fn test_required_fields_whitespace_and_missing() {
        let data = FormData::from_pairs([("company", "   ")]);
        let result = validate_required_fields(&data, &["company", "start_date"]);

        assert_eq!(result.get("company"), Some("company is required"));
        assert_eq!(result.get("start_date"), Some("start date is required"));
    }

    #[test]
    fn test_required_message_replaces_first_underscore_only() {
        let data = FormData::from_pairs([("title", "x")]);
        let result = validate_required_fields(&data, &["social_media_links", "end_date"]);

        assert_eq!(
            result.get("social_media_links"),
            Some("social media_links is required")
        );
        assert_eq!(result.get("end_date"), Some("end date is required"));
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("").is_valid());
        assert!(validate_email("me@example.com").is_valid());
        assert!(!validate_email("me@example").is_valid());
        assert!(!validate_email("me @example.com").is_valid());
        assert_eq!(
            validate_email("nope").get("email"),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_url_validation_key_and_message() {
        let invalid = validate_url("not-a-url", "Image URL");
        assert!(!invalid.is_valid());
        assert_eq!(invalid.get("image_url"), Some("Image URL must be a valid URL"));

        assert!(validate_url("https://x.com", "Image URL").is_valid());
        assert!(validate_url("", "Image URL").is_valid());
        assert!(validate_url("   ", "Image URL").is_valid());
    }

    #[test]
    fn test_json_validation() {
        assert!(validate_json(r#"[{"name":"GitHub","url":"https://github.com"}]"#, "Links").is_valid());
        let invalid = validate_json("[{name}]", "Links");
        assert_eq!(invalid.get("links"), Some("Links must be valid JSON format"));
    }

    #[test]
    fn test_positive_number() {
        assert!(validate_positive_number("0", "Team Size").is_valid());
        assert!(validate_positive_number("12", "Team Size").is_valid());
        assert!(validate_positive_number("", "Team Size").is_valid());
        assert!(validate_positive_number("5 people", "Team Size").is_valid());
        assert!(!validate_positive_number("-1", "Team Size").is_valid());
        assert_eq!(
            validate_positive_number("many", "Team Size").get("team_size"),
            Some("Team Size must be a positive number")
        );
    }

    #[test]
    fn test_date_range() {
        let reversed = validate_date_range("2024-05-01", "2024-01-01");
        assert_eq!(reversed.get("end_date"), Some("End date cannot be before start date"));

        assert!(validate_date_range("2024-01-01", "2024-05-01").is_valid());
        assert!(validate_date_range("2024-01-01", "2024-01-01").is_valid());
        assert!(validate_date_range("", "2024-01-01").is_valid());
        assert!(validate_date_range("2024-01-01", "").is_valid());
        assert!(validate_date_range("soon", "2024-01-01").is_valid());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("3.9"), Some(3));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_date_format() {
        assert!(validate_date("2023-02-28", "Start Date").is_valid());
        assert_eq!(
            validate_date("28/02/2023", "Start Date").get("start_date"),
            Some("Start Date must be in YYYY-MM-DD format")
        );
    }
}
