// src/contact/validators.rs

use super::models::ContactForm;
use crate::common::validation::{
    combine_validation_results, validate_email, validate_max_length, validate_min_length,
    validate_required_fields,
};
use crate::common::{ValidationResult, Validator};

pub struct ContactValidator;

impl Validator<ContactForm> for ContactValidator {
    fn validate(&self, data: &ContactForm) -> ValidationResult {
        combine_validation_results([
            validate_required_fields(data, &["name", "email", "subject", "message"]),
            validate_email(data.email.trim()),
            validate_max_length(&data.name, "Name", 120),
            validate_max_length(&data.subject, "Subject", 200),
            validate_min_length(&data.message, "Message", 10),
            validate_max_length(&data.message, "Message", 5000),
            validate_max_length(&data.phone, "Phone", 50),
        ])
    }
}
