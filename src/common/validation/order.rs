// src/common/validation/order.rs
//! Display order validation against sibling records

use serde::{Deserialize, Serialize};

use super::fields::parse_leading_int;
use super::result::ValidationResult;

/// A sibling record's identity and display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderedItem {
    pub id: i64,
    #[sqlx(rename = "display_order")]
    pub order: i64,
}

/// Siblings to check an order value against.
///
/// `current_id` is the record being edited, if any; it never collides with
/// its own stored order.
#[derive(Debug, Clone, Default)]
pub struct OrderValidationContext {
    pub current_id: Option<i64>,
    pub existing_items: Vec<OrderedItem>,
}

impl OrderValidationContext {
    pub fn for_create(existing_items: Vec<OrderedItem>) -> Self {
        Self {
            current_id: None,
            existing_items,
        }
    }

    pub fn for_update(current_id: i64, existing_items: Vec<OrderedItem>) -> Self {
        Self {
            current_id: Some(current_id),
            existing_items,
        }
    }

    /// One past the highest sibling order, or 0 without siblings
    pub fn next_order(&self) -> i64 {
        self.existing_items
            .iter()
            .filter(|item| Some(item.id) != self.current_id)
            .map(|item| item.order)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    fn is_taken(&self, order: i64) -> bool {
        self.existing_items
            .iter()
            .any(|item| item.order == order && Some(item.id) != self.current_id)
    }
}

/// An order as submitted: form text or an already numeric value.
///
/// Fractional and out-of-range numbers land in `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderValue {
    Number(i64),
    Float(f64),
    Text(String),
}

impl OrderValue {
    /// Text uses leading-integer parsing; floats truncate toward zero and
    /// saturate, non-finite floats are not numbers
    pub fn as_int(&self) -> Option<i64> {
        match self {
            OrderValue::Number(n) => Some(*n),
            OrderValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            OrderValue::Float(_) => None,
            OrderValue::Text(text) => parse_leading_int(text),
        }
    }
}

impl Default for OrderValue {
    fn default() -> Self {
        OrderValue::Number(0)
    }
}

impl From<i64> for OrderValue {
    fn from(n: i64) -> Self {
        OrderValue::Number(n)
    }
}

impl From<&str> for OrderValue {
    fn from(text: &str) -> Self {
        OrderValue::Text(text.to_string())
    }
}

/// Checks an order value, in priority order: numeric, non-negative, unused.
///
/// At most one message is reported, always on the `order` field.
pub fn validate_order_field(
    order_value: &OrderValue,
    context: &OrderValidationContext,
) -> ValidationResult {
    let order = match order_value.as_int() {
        Some(order) => order,
        None => return ValidationResult::with_error("order", "Display order must be a valid number"),
    };

    if order < 0 {
        return ValidationResult::with_error("order", "Display order cannot be negative");
    }

    if context.is_taken(order) {
        return ValidationResult::with_error(
            "order",
            format!(
                "Display order {} is already used. Please choose a different number.",
                order
            ),
        );
    }

    ValidationResult::new()
}
