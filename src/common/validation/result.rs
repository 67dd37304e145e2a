// src/common/validation/result.rs
//! Validation result type, combinator and message formatter

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

/// A single field error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Outcome of one or more validation checks.
///
/// Errors are keyed by field name, at most one message per field, and keep
/// the order in which fields first failed. A result is valid exactly when it
/// holds no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Builds a result holding a single error
    pub fn with_error(field: &str, message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.add_error(field, message);
        result
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Sets the message for `field`, replacing any earlier message in place
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.errors.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.message = message,
            None => self.errors.push(ValidationError {
                field: field.to_string(),
                message,
            }),
        }
    }

    /// Folds `other` into this result; later messages win on the same field
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(&error.field, error.message);
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human readable rendering of every message in this result
    pub fn message(&self) -> String {
        format_validation_errors(&self.errors)
    }
}

/// Merges the errors of every result into a new one.
///
/// When two results carry a message for the same field the later one is kept.
pub fn combine_validation_results<I>(results: I) -> ValidationResult
where
    I: IntoIterator<Item = ValidationResult>,
{
    let mut combined = ValidationResult::new();
    for result in results {
        combined.merge(result);
    }
    combined
}

/// Renders errors for display.
///
/// No errors gives an empty string and a single error gives its message
/// unchanged. Anything more becomes a bulleted list under a heading.
pub fn format_validation_errors(errors: &[ValidationError]) -> String {
    match errors {
        [] => String::new(),
        [only] => only.message.clone(),
        many => {
            let bullets: Vec<&str> = many.iter().map(|e| e.message.as_str()).collect();
            format!("Please fix the following issues:\n• {}", bullets.join("\n• "))
        }
    }
}

/// Field → message map in error order
struct ErrorMap<'a>(&'a [ValidationError]);

impl Serialize for ErrorMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for error in self.0 {
            map.serialize_entry(&error.field, &error.message)?;
        }
        map.end()
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("is_valid", &self.is_valid())?;
        state.serialize_field("errors", &ErrorMap(&self.errors))?;
        state.end()
    }
}

impl ValidationResult {
    /// The per-field mapping on its own, as sent back to clients
    pub fn fields_json(&self) -> serde_json::Value {
        serde_json::to_value(ErrorMap(&self.errors)).unwrap_or_default()
    }
}
