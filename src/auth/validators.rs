// src/auth/validators.rs

use super::models::{LoginForm, RegisterForm};
use crate::common::validation::{
    combine_validation_results, validate_email, validate_max_length, validate_min_length,
    validate_required_fields, ValidationResult, Validator,
};

pub struct RegistrationValidator;

impl Validator<RegisterForm> for RegistrationValidator {
    fn validate(&self, data: &RegisterForm) -> ValidationResult {
        combine_validation_results([
            validate_required_fields(data, &["username", "email", "password"]),
            validate_min_length(&data.username, "Username", 3),
            validate_max_length(&data.username, "Username", 80),
            validate_email(&data.email),
            validate_min_length(&data.password, "Password", 6),
        ])
    }
}

pub struct LoginValidator;

impl Validator<LoginForm> for LoginValidator {
    fn validate(&self, data: &LoginForm) -> ValidationResult {
        validate_required_fields(data, &["username", "password"])
    }
}
