// Helper functions for safe logging, input escaping and JSON list columns

use serde::{Serialize, Serializer};

/// Masks email addresses for safe logging
///
/// # Example
/// ```
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 && !parts[0].is_empty() {
            let first = parts[0].chars().next().unwrap_or('*');
            format!("{}***@{}", first, parts[1])
        } else {
            "***@***.***".to_string()
        }
    } else {
        "***@***.***".to_string()
    }
}

/// Escapes HTML special characters in user supplied text
pub fn sanitize_input(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// `sanitize_input` over an optional value
pub fn sanitize_opt(s: Option<String>) -> Option<String> {
    s.map(|v| sanitize_input(&v))
}

/// Encodes a value for a JSON TEXT column
pub fn to_json_column<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Serializes a JSON TEXT column as the JSON it holds
pub fn serialize_json_column<S>(column: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match column {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).unwrap_or(serde_json::Value::Null);
            value.serialize(serializer)
        }
        None => serializer.serialize_none(),
    }
}

/// Serializes a JSON TEXT column holding a list; anything unreadable is `[]`
pub fn serialize_json_list<S>(column: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let items: Vec<serde_json::Value> = column
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();
    items.serialize(serializer)
}

/// Serializes a SQLite INTEGER flag as a boolean
pub fn serialize_flag<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_bool(*value != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        #[serde(serialize_with = "serialize_json_list")]
        tech: Option<String>,
        #[serde(serialize_with = "serialize_json_column")]
        links: Option<String>,
        #[serde(serialize_with = "serialize_flag")]
        is_visible: i64,
    }

    #[test]
    fn test_safe_email_log() {
        assert_eq!(safe_email_log("user@example.com"), "u***@example.com");
        assert_eq!(safe_email_log("bad"), "***@***.***");
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(
            sanitize_input("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
        assert_eq!(sanitize_input("plain"), "plain");
    }

    #[test]
    fn test_json_columns_serialize_as_json() {
        let row = Row {
            tech: Some(to_json_column(&vec!["Rust", "SQL"])),
            links: None,
            is_visible: 1,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["tech"], serde_json::json!(["Rust", "SQL"]));
        assert!(json["links"].is_null());
        assert_eq!(json["is_visible"], true);

        let broken = Row {
            tech: Some("not json".to_string()),
            links: None,
            is_visible: 0,
        };
        let json = serde_json::to_value(&broken).unwrap();
        assert_eq!(json["tech"], serde_json::json!([]));
        assert_eq!(json["is_visible"], false);
    }
}
