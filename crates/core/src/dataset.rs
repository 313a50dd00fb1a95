use indexmap::IndexMap;
use serde::Serialize;

use crate::value::RawValue;

static EMPTY: RawValue = RawValue::Empty;

/// One record: column name -> raw value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, RawValue>,
}

impl Row {
    /// Value for `column`; missing keys read as `Empty`.
    pub fn get(&self, column: &str) -> &RawValue {
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    /// Whether the row carries the key at all (an explicit `Empty` counts).
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Immutable snapshot of an uploaded table.
///
/// `columns` holds unique names in first-seen order. Row keys outside
/// `columns` are dropped on construction so every row's key set stays a subset.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(columns.len());
        for col in columns {
            if !unique.contains(&col) {
                unique.push(col);
            }
        }

        let rows = rows
            .into_iter()
            .map(|mut row| Row {
                cells: unique
                    .iter()
                    .filter_map(|col| row.cells.swap_remove_entry(col))
                    .collect(),
            })
            .collect();

        Self {
            name: name.into(),
            columns: unique,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of `column` in row order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a RawValue> + 'a {
        self.rows.iter().map(move |row| row.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_empty() {
        let row: Row = [("a", "1")].into_iter().collect();
        assert_eq!(row.get("a"), &RawValue::Text("1".into()));
        assert_eq!(row.get("b"), &RawValue::Empty);
        assert!(row.contains("a"));
        assert!(!row.contains("b"));
    }

    #[test]
    fn dataset_dedupes_columns_and_drops_foreign_keys() {
        let row: Row = [("a", "1"), ("z", "9")].into_iter().collect();
        let ds = Dataset::new(
            "t.csv",
            vec!["a".into(), "b".into(), "a".into()],
            vec![row],
        );
        assert_eq!(ds.columns(), &["a".to_string(), "b".to_string()]);
        assert!(!ds.rows()[0].contains("z"));
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.row_count(), 1);
    }

    #[test]
    fn row_serializes_in_insertion_order() {
        let keys = ["k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8"];
        let build = || keys.iter().map(|k| (*k, "v")).collect::<Row>();
        let first = serde_json::to_string(&build()).unwrap();
        for _ in 0..20 {
            assert_eq!(serde_json::to_string(&build()).unwrap(), first);
        }
        assert!(first.starts_with(r#"{"k1":"v","k2":"v""#));
    }

    #[test]
    fn dataset_rows_follow_column_order() {
        let row: Row = [("c", "3"), ("a", "1"), ("b", "2")].into_iter().collect();
        let ds = Dataset::new("t.json", vec!["a".into(), "b".into(), "c".into()], vec![row]);
        let json = serde_json::to_string(&ds.rows()[0]).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2","c":"3"}"#);
    }
}
