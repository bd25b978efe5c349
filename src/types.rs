//! Wire types for the two backend endpoints.
//!
//! The backend owns table extraction, so everything here is lenient: a table
//! with a missing title, missing headers or odd cells still renders.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /api/condense`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CondenseRequest {
    pub text: String,
}

/// Success body of `POST /api/condense`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CondenseResult {
    pub condensed: String,
}

/// Body of `POST /api/parse_markdown_tables`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseTablesRequest {
    pub markdown: String,
}

/// Success body of `POST /api/parse_markdown_tables`.
///
/// Tables are kept as the raw JSON objects the backend sent so the JSON
/// shown next to each rendered table is exactly what came over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParseTablesResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tables: Vec<Value>,
}

/// `"tables": null` reads as no tables.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ParseTablesResult {
    /// Typed view of every table, in response order.
    pub fn parsed(&self) -> Vec<Table> {
        self.tables.iter().map(Table::from_value).collect()
    }
}

/// One extracted table. Rows need not match the header length.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from an arbitrary JSON value, treating anything missing
    /// or malformed as empty.
    pub fn from_value(value: &Value) -> Self {
        let title = value
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let headers = value
            .get("headers")
            .and_then(Value::as_array)
            .map(|cells| cells.iter().map(cell_text).collect())
            .unwrap_or_default();

        let rows = value
            .get("rows")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| cells.iter().map(cell_text).collect())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Table {
            title,
            headers,
            rows,
        }
    }

    /// Widest of the header row and every body row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Display text for a single cell: strings verbatim, null as empty,
/// anything else as compact JSON.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full_table() {
        let table = Table::from_value(&json!({
            "title": "T",
            "headers": ["a", "b"],
            "rows": [["1", "2"]]
        }));
        assert_eq!(table.title, "T");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn test_from_value_missing_fields_are_empty() {
        let table = Table::from_value(&json!({}));
        assert_eq!(table, Table::default());

        let table = Table::from_value(&json!("not an object"));
        assert_eq!(table, Table::default());
    }

    #[test]
    fn test_from_value_non_string_cells() {
        let table = Table::from_value(&json!({
            "headers": ["n", 2],
            "rows": [[1.5, null, true], "junk"]
        }));
        assert_eq!(table.headers, vec!["n", "2"]);
        assert_eq!(table.rows[0], vec!["1.5", "", "true"]);
        assert!(table.rows[1].is_empty());
    }

    #[test]
    fn test_column_count_uses_widest_row() {
        let table = Table {
            title: String::new(),
            headers: vec!["a".into()],
            rows: vec![vec!["1".into(), "2".into(), "3".into()]],
        };
        assert_eq!(table.column_count(), 3);
        assert_eq!(Table::default().column_count(), 0);
    }

    #[test]
    fn test_missing_tables_field_defaults_to_empty() {
        let result: ParseTablesResult = serde_json::from_str("{}").unwrap();
        assert!(result.tables.is_empty());
    }

    #[test]
    fn test_null_tables_field_defaults_to_empty() {
        let result: ParseTablesResult = serde_json::from_str(r#"{"tables": null}"#).unwrap();
        assert!(result.tables.is_empty());
    }
}
