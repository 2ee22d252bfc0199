//! JSON export
//!
//! The payload is written back exactly as received, pretty-printed with two
//! space indentation. Key order survives because `serde_json` is built with
//! `preserve_order`.

use serde_json::Value;

use crate::error::ExportResult;

/// Pretty-print a payload with no transformation
pub fn render_json(data: &Value) -> ExportResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(data)?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_preserves_structure_and_order() {
        let data = json!([
            {"zeta": 1, "alpha": "pending", "items": [{"name": "Savon", "price": 1500}]},
            {"zeta": 2, "alpha": null, "items": []}
        ]);
        let bytes = render_json(&data).unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(parsed, data);
        let keys: Vec<&String> = parsed[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "items"]);
    }

    #[test]
    fn test_no_status_translation() {
        let text = String::from_utf8(render_json(&json!([{"status": "pending"}])).unwrap()).unwrap();
        assert!(text.contains("\"pending\""));
        assert!(!text.contains("En attente"));
    }

    #[test]
    fn test_two_space_indent() {
        let text = String::from_utf8(render_json(&json!({"records": [], "metadata": {"a": 1}})).unwrap()).unwrap();
        assert_eq!(text, "{\n  \"records\": [],\n  \"metadata\": {\n    \"a\": 1\n  }\n}\n");
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(render_json(&json!([])).unwrap(), b"[]\n");
    }
}
