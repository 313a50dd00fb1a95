// JSON ingestion (array of objects)

use std::path::Path;

use dashgen_core::{Dataset, RawValue, Row};
use serde_json::Value;

use crate::error::IoError;

pub fn import(path: &Path, max_rows: usize) -> Result<Dataset, IoError> {
    let content = crate::csv::read_file_as_utf8(path)?;
    from_json_str(&crate::dataset_name(path), &content, max_rows)
}

/// Decode a JSON array of objects.
///
/// Columns are the keys of the first object, in document order. Keys that
/// only appear in later objects are ignored; keys missing from a later object
/// read as empty.
pub fn from_json_str(name: &str, content: &str, max_rows: usize) -> Result<Dataset, IoError> {
    if content.trim().is_empty() {
        return Err(IoError::Empty);
    }

    let value: Value = serde_json::from_str(content)
        .map_err(|e| IoError::Parse(format!("JSON parse error: {e}")))?;

    let Value::Array(items) = value else {
        return Err(IoError::Parse("JSON must be an array of objects".into()));
    };

    let columns: Vec<String> = match items.first() {
        Some(Value::Object(obj)) => obj.keys().cloned().collect(),
        Some(_) => return Err(IoError::Parse("row 0: expected object".into())),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for (idx, item) in items.iter().enumerate().take(max_rows) {
        let Value::Object(obj) = item else {
            return Err(IoError::Parse(format!("row {idx}: expected object")));
        };
        let row: Row = obj
            .iter()
            .filter(|(k, _)| columns.contains(k))
            .map(|(k, v)| (k.as_str(), json_value_to_raw(v)))
            .collect();
        rows.push(row);
    }

    if items.len() > max_rows {
        log::debug!("{name}: kept first {max_rows} rows, skipped {}", items.len() - max_rows);
    }

    Ok(Dataset::new(name, columns, rows))
}

fn json_value_to_raw(val: &Value) -> RawValue {
    match val {
        Value::Null => RawValue::Empty,
        Value::Bool(b) => RawValue::Text(b.to_string()),
        Value::Number(n) => n.as_f64().map(RawValue::Number).unwrap_or(RawValue::Empty),
        Value::String(s) => RawValue::from_text(s.as_str()),
        Value::Array(_) | Value::Object(_) => RawValue::Text(val.to_string()),
    }
}
