//! Row extraction from loosely shaped JSON containers.

use dash_model::Row;
use serde_json::Value;
use tracing::warn;

/// Keys under which a wrapped row array may live, checked in order.
const CONTAINER_KEYS: &[&str] = &["data", "content", "rows"];

/// Wrappers nested deeper than this are not unpacked.
const MAX_WRAPPER_DEPTH: usize = 3;

/// Rows from a direct array of objects, or from an array nested under
/// `data`, `content` or `rows`.
///
/// Unrecognised shapes and non-object array items yield no rows.
pub fn extract_rows(value: &Value) -> Vec<Row> {
    match find_row_array(value, 0) {
        Some(items) => {
            let rows: Vec<Row> = items
                .iter()
                .filter_map(Value::as_object)
                .map(Row::from_json_object)
                .collect();
            if rows.len() < items.len() {
                warn!(
                    skipped = items.len() - rows.len(),
                    "skipping row items that are not objects"
                );
            }
            rows
        }
        None => {
            if !value.is_null() {
                warn!(kind = json_kind(value), "unrecognised row container shape");
            }
            Vec::new()
        }
    }
}

fn find_row_array(value: &Value, depth: usize) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) if depth < MAX_WRAPPER_DEPTH => CONTAINER_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(|inner| find_row_array(inner, depth + 1))),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use dash_model::CellValue;
    use serde_json::json;

    use super::*;

    #[test]
    fn direct_array() {
        let rows = extract_rows(&json!([{"Region": "East", "Revenue": 100}]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Revenue"), Some(&CellValue::Number(100.0)));
    }

    #[test]
    fn wrapped_arrays() {
        let row = json!({"a": 1});
        for wrapped in [
            json!({"data": [row.clone()]}),
            json!({"content": [row.clone()]}),
            json!({"rows": [row.clone()]}),
            json!({"data": {"rows": [row.clone()]}}),
        ] {
            assert_eq!(extract_rows(&wrapped).len(), 1, "{wrapped}");
        }
    }

    #[test]
    fn unknown_shapes_are_empty() {
        assert!(extract_rows(&json!({"items": [{"a": 1}]})).is_empty());
        assert!(extract_rows(&json!("rows")).is_empty());
        assert!(extract_rows(&Value::Null).is_empty());
        assert_eq!(extract_rows(&json!([1, {"a": 1}, "x"])).len(), 1);
    }
}
