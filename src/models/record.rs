//! Export records and metadata
//!
//! Records are ordered JSON objects: the order fields were inserted in is the
//! order columns appear in, so the crate relies on `serde_json`'s
//! `preserve_order` feature.

use serde_json::{Map, Number, Value};

/// One exportable row (an order, a product, a client...)
pub type ExportRecord = Map<String, Value>;

/// Descriptive key/value pairs rendered as a banner above the table
pub type ExportMetadata = Map<String, Value>;

/// Turn a camelCase or snake_case key into capitalized words
///
/// `customerEmail` becomes `Customer Email`, `date_range` becomes `Date range`.
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);

    for (i, c) in key.chars().enumerate() {
        if c == '_' {
            out.push(' ');
            continue;
        }
        if c.is_uppercase() && i > 0 && !out.ends_with(' ') {
            out.push(' ');
        }
        out.push(c);
    }

    let words: Vec<&str> = out.split_whitespace().collect();
    let joined = words.join(" ");

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strings, numbers and booleans are shown in banners; everything else is skipped
pub fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Default string conversion of a cell value
///
/// `null` becomes an empty string and nested values are written as compact
/// JSON. No locale or currency formatting happens here.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Integral floats print without a trailing `.0`
pub fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Banner lines as `(Humanized Key, value)` pairs
///
/// Non-scalar entries and keys listed in `excluded` are left out.
pub fn banner_entries(metadata: &ExportMetadata, excluded: &[&str]) -> Vec<(String, String)> {
    metadata
        .iter()
        .filter(|(key, value)| is_scalar(value) && !excluded.contains(&key.as_str()))
        .map(|(key, value)| (humanize_key(key), value_text(value)))
        .collect()
}

/// Column keys taken from the first record, in insertion order
pub fn column_keys(records: &[ExportRecord], skip: &[&str]) -> Vec<String> {
    records
        .first()
        .map(|first| {
            first
                .keys()
                .filter(|k| !skip.contains(&k.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Merge embedded and explicit metadata; explicit entries win on key clashes
pub fn merge_metadata(
    embedded: Option<ExportMetadata>,
    explicit: Option<&ExportMetadata>,
) -> Option<ExportMetadata> {
    match (embedded, explicit) {
        (None, None) => None,
        (Some(embedded), None) => Some(embedded),
        (None, Some(explicit)) => Some(explicit.clone()),
        (Some(mut embedded), Some(explicit)) => {
            for (key, value) in explicit {
                embedded.insert(key.clone(), value.clone());
            }
            Some(embedded)
        }
    }
}

/// Read a metadata string entry
pub fn metadata_str<'a>(metadata: Option<&'a ExportMetadata>, key: &str) -> Option<&'a str> {
    metadata
        .and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("customerEmail"), "Customer Email");
        assert_eq!(humanize_key("count"), "Count");
        assert_eq!(humanize_key("date_range"), "Date range");
        assert_eq!(humanize_key("totalOrdersThisMonth"), "Total Orders This Month");
        assert_eq!(humanize_key(""), "");
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("A1")), "A1");
        assert_eq!(value_text(&json!(100)), "100");
        assert_eq!(value_text(&json!(2.5)), "2.5");
        assert_eq!(value_text(&json!(3.0)), "3");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&Value::Null), "");
        assert_eq!(value_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_banner_skips_objects_and_excluded_keys() {
        let meta = object(json!({"title": "X", "count": 5, "nested": {"a": 1}, "tags": ["a"]}));
        let lines = banner_entries(&meta, &["title"]);
        assert_eq!(lines, vec![("Count".to_string(), "5".to_string())]);
    }

    #[test]
    fn test_column_keys_keep_insertion_order() {
        let records = vec![object(json!({"id": "A1", "status": "pending", "total": "100"}))];
        assert_eq!(column_keys(&records, &[]), vec!["id", "status", "total"]);
        assert_eq!(column_keys(&records, &["status"]), vec!["id", "total"]);
        assert!(column_keys(&[], &[]).is_empty());
    }

    #[test]
    fn test_merge_metadata_explicit_wins() {
        let embedded = object(json!({"title": "Embedded", "count": 2}));
        let explicit = object(json!({"title": "Explicit"}));
        let merged = merge_metadata(Some(embedded), Some(&explicit)).unwrap();
        assert_eq!(merged["title"], "Explicit");
        assert_eq!(merged["count"], 2);
        assert!(merge_metadata(None, None).is_none());
    }
}
