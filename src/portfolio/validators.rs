// src/portfolio/validators.rs

use serde_json::Value;

use super::models::*;
use crate::common::validation::{
    combine_validation_results, field_key, parse_date_value, validate_date, validate_date_range,
    validate_email, validate_json, validate_max_length, validate_order_field,
    validate_positive_number, validate_required_fields, validate_url, OrderValidationContext,
    OrderValue,
};
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Ordered content: projects, experiences, technical skills
// ============================================================================

/// Order is optional on these forms; an absent value is assigned later
fn validate_optional_order(
    order: Option<&OrderValue>,
    context: &OrderValidationContext,
) -> ValidationResult {
    match order {
        Some(value) => validate_order_field(value, context),
        None => ValidationResult::new(),
    }
}

/// Links must be an array of `{name, url}` objects, each with an absolute
/// URL. Unparsable JSON is left to `validate_json`.
fn validate_links(raw: &str) -> ValidationResult {
    let Ok(value) = serde_json::from_str::<Value>(raw.trim()) else {
        return ValidationResult::new();
    };
    let Value::Array(items) = value else {
        return ValidationResult::with_error(
            "links",
            "Links must be a JSON array of {name, url} objects",
        );
    };

    for item in &items {
        let url = match item {
            Value::Object(map) => map.get("url").and_then(Value::as_str).unwrap_or(""),
            _ => {
                return ValidationResult::with_error(
                    "links",
                    "Links must be a JSON array of {name, url} objects",
                )
            }
        };
        if url.trim().is_empty() || !validate_url(url, "Links").is_valid() {
            return ValidationResult::with_error("links", "Each link must have a valid URL");
        }
    }

    ValidationResult::new()
}

pub struct ProjectValidator {
    pub order_context: OrderValidationContext,
}

impl Validator<ProjectForm> for ProjectValidator {
    fn validate(&self, data: &ProjectForm) -> ValidationResult {
        combine_validation_results([
            validate_required_fields(data, &["title", "description"]),
            validate_max_length(&data.title, "Title", 200),
            validate_optional_order(data.order.as_ref(), &self.order_context),
            validate_date(&data.start_date, "Start Date"),
            validate_date(&data.end_date, "End Date"),
            validate_date_range(&data.start_date, &data.end_date),
            validate_json(&data.links, "Links"),
            validate_links(&data.links),
            validate_positive_number(&data.team_size, "Team Size"),
            validate_url(&data.image, "Image URL"),
        ])
    }
}

pub struct ExperienceValidator {
    pub order_context: OrderValidationContext,
}

impl Validator<ExperienceForm> for ExperienceValidator {
    fn validate(&self, data: &ExperienceForm) -> ValidationResult {
        combine_validation_results([
            validate_required_fields(data, &["title", "company"]),
            validate_max_length(&data.title, "Title", 200),
            validate_max_length(&data.company, "Company", 200),
            validate_optional_order(data.order.as_ref(), &self.order_context),
            validate_date(&data.start_date, "Start Date"),
            validate_date(&data.end_date, "End Date"),
            validate_date_range(&data.start_date, &data.end_date),
        ])
    }
}

pub struct TechnicalSkillValidator {
    pub order_context: OrderValidationContext,
}

impl Validator<TechnicalSkillForm> for TechnicalSkillValidator {
    fn validate(&self, data: &TechnicalSkillForm) -> ValidationResult {
        combine_validation_results([
            validate_required_fields(data, &["title"]),
            validate_max_length(&data.title, "Title", 200),
            validate_optional_order(data.order.as_ref(), &self.order_context),
        ])
    }
}

// ============================================================================
// Unordered content
// ============================================================================

pub struct CertificationValidator;

impl Validator<CertificationForm> for CertificationValidator {
    fn validate(&self, data: &CertificationForm) -> ValidationResult {
        combine_validation_results([
            validate_required_fields(data, &["name", "issuer"]),
            validate_url(&data.credential_url, "Credential URL"),
            validate_url(&data.image, "Image URL"),
            validate_date(&data.expiration_date, "Expiration Date"),
        ])
    }
}

/// Blog dates may carry a time of day
fn validate_timestamp(value: &str, field_name: &str) -> ValidationResult {
    if !value.trim().is_empty() && parse_date_value(value).is_none() {
        return ValidationResult::with_error(
            &field_key(field_name),
            format!("{} must be a valid date", field_name),
        );
    }
    ValidationResult::new()
}

pub struct BlogValidator;

impl Validator<BlogForm> for BlogValidator {
    fn validate(&self, data: &BlogForm) -> ValidationResult {
        combine_validation_results([
            validate_required_fields(data, &["title", "content"]),
            validate_max_length(&data.title, "Title", 200),
            validate_max_length(&data.excerpt, "Excerpt", 500),
            validate_url(&data.cover_image, "Cover Image"),
            validate_positive_number(&data.reading_time, "Reading Time"),
            validate_timestamp(&data.date, "Date"),
        ])
    }
}

/// Social links are a JSON object keyed by network
fn validate_social_links(raw: &str) -> ValidationResult {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(Value::Object(_)) | Err(_) => ValidationResult::new(),
        Ok(_) => ValidationResult::with_error("social_links", "Social Links must be a JSON object"),
    }
}

pub struct AboutValidator;

impl Validator<AboutForm> for AboutValidator {
    fn validate(&self, data: &AboutForm) -> ValidationResult {
        combine_validation_results([
            validate_required_fields(data, &["name", "bio"]),
            validate_email(&data.email),
            validate_url(&data.photo, "Photo URL"),
            validate_url(&data.cover_image, "Cover Image"),
            validate_url(&data.resume_url, "Resume URL"),
            validate_json(&data.social_links, "Social Links"),
            validate_social_links(&data.social_links),
            validate_date(&data.birthday, "Birthday"),
        ])
    }
}
