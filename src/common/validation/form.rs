// src/common/validation/form.rs
//! Form state plumbing: field lookup, lenient text deserialization and
//! list splitting for values carried as text.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Field lookup by name, shared by ad hoc form maps and typed forms
pub trait FormFields {
    fn field(&self, name: &str) -> Option<&str>;
}

/// Untyped form state: field name → text value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormData(HashMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }
}

impl FormFields for FormData {
    fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl FormFields for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Deserializes a form value as text.
///
/// Strings pass through, numbers and booleans are rendered, and `null` or a
/// missing field becomes the empty string.
pub fn form_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a text form value, found {}",
            other
        ))),
    }
}

/// Like [`form_text`], but arrays and objects are kept as compact JSON text.
///
/// Used for list and JSON fields that a client may send either as text or
/// already structured.
pub fn form_json_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(other) => Ok(other.to_string()),
    }
}

/// Splits a comma separated list, dropping blank entries.
///
/// A JSON array of strings is taken as is.
pub fn split_comma_list(value: &str) -> Vec<String> {
    json_list(value).unwrap_or_else(|| split_list(value, ','))
}

/// Splits a one-per-line list, dropping blank lines.
///
/// A JSON array of strings is taken as is.
pub fn split_line_list(value: &str) -> Vec<String> {
    json_list(value).unwrap_or_else(|| split_list(value, '\n'))
}

fn json_list(value: &str) -> Option<Vec<String>> {
    let trimmed = value.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    let items: Vec<String> = serde_json::from_str(trimmed).ok()?;
    Some(
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Blank text becomes `None`
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
