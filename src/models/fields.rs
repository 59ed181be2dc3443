//! Helpers for reading loosely-typed store fields.

use serde_json::{Map, Value};

/// Render a field value as display text.
///
/// Strings are returned as-is, numbers and booleans are formatted,
/// `null` becomes the empty string.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Text of a named field, empty when absent.
pub fn text(fields: &Map<String, Value>, name: &str) -> String {
    fields.get(name).map(value_text).unwrap_or_default()
}

/// Value of a named field, or an empty string when absent, `null`, `false`,
/// zero or empty.
pub fn value_or_empty(fields: &Map<String, Value>, name: &str) -> Value {
    match fields.get(name) {
        Some(v) if is_present(v) => v.clone(),
        _ => Value::String(String::new()),
    }
}

/// Whether a JSON value counts as supplied.
///
/// `null`, `false`, `0`, blank strings and empty arrays do not.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// JavaScript-style truthiness: empty arrays and objects count, `""`, `0`,
/// `false` and `null` do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether an optional string field is missing or blank.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("abc")), "abc");
        assert_eq!(value_text(&json!(4)), "4");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!(true)), "true");
    }

    #[test]
    fn test_value_or_empty() {
        let fields = json!({ "Servings": 4, "Type": "", "Zero": 0 });
        let fields = fields.as_object().unwrap();
        assert_eq!(value_or_empty(fields, "Servings"), json!(4));
        assert_eq!(value_or_empty(fields, "Type"), json!(""));
        assert_eq!(value_or_empty(fields, "Zero"), json!(""));
        assert_eq!(value_or_empty(fields, "Missing"), json!(""));
    }

    #[test]
    fn test_is_present() {
        assert!(is_present(&json!("x")));
        assert!(is_present(&json!(2)));
        assert!(!is_present(&json!("  ")));
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!([])));
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(" ")));
        assert!(is_truthy(&json!(1)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(null)));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("soup")));
    }
}
