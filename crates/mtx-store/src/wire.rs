//! Wire-format translation.
//!
//! On the wire a table is a JSON mapping from column name to an ordered
//! list of scalar values; all lists under one table must have equal length.
//! Key order is normative and preserved end to end (`serde_json` with
//! `preserve_order`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use mtx_types::{Column, ColumnType, Table, Value};

use crate::config::IngestConfig;
use crate::datetime::detect_datetime_columns;
use crate::error::TableTranslationError;

/// A table in wire form: column name → list of scalars, in column order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableDocument(pub Map<String, JsonValue>);

impl TableDocument {
    /// Wire rendition of an in-memory table. Timestamps serialize as
    /// RFC 3339 strings.
    pub fn from_table(table: &Table) -> Self {
        let mut map = Map::with_capacity(table.n_columns());
        for column in table.columns() {
            let values: Vec<JsonValue> =
                column.values().iter().map(value_to_json).collect();
            map.insert(column.name().to_string(), JsonValue::Array(values));
        }
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total cell count across all columns.
    pub fn cell_count(&self) -> usize {
        self.0
            .values()
            .map(|v| v.as_array().map(Vec::len).unwrap_or(0))
            .sum()
    }

    /// Translate into a table, enforcing the format invariants: every
    /// column is a list, lists have equal lengths, cells are scalars, and
    /// each column holds a single scalar kind. Column order follows the
    /// document's key order.
    pub fn to_table(&self) -> Result<Table, TableTranslationError> {
        let mut columns = Vec::with_capacity(self.0.len());
        let mut expected_len: Option<usize> = None;

        for (name, cells) in &self.0 {
            let cells = cells
                .as_array()
                .ok_or_else(|| TableTranslationError::NotAList {
                    column: name.clone(),
                })?;

            let expected = *expected_len.get_or_insert(cells.len());
            if cells.len() != expected {
                return Err(TableTranslationError::UnequalColumnLengths {
                    column: name.clone(),
                    expected,
                    actual: cells.len(),
                });
            }

            columns.push(translate_column(name, cells)?);
        }

        // Invariants were checked above; construction cannot fail.
        Ok(Table::new(columns).expect("translated columns satisfy table invariants"))
    }

    /// Upload path: enforce ingestion limits, translate, and run date/time
    /// detection so timestamp-like text columns come out typed.
    pub fn ingest(&self, config: &IngestConfig) -> Result<Table, TableTranslationError> {
        let cells = self.cell_count();
        if cells > config.max_cells {
            return Err(TableTranslationError::TooLarge {
                cells,
                max_cells: config.max_cells,
            });
        }
        let table = self.to_table()?;
        Ok(detect_datetime_columns(&table))
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            // Non-finite numbers have no JSON form; null is the only
            // faithful rendition.
            .unwrap_or(JsonValue::Null),
        Value::Timestamp(t) => JsonValue::String(t.to_rfc3339()),
        Value::Text(s) => JsonValue::String(s.clone()),
    }
}

fn translate_column(
    name: &str,
    cells: &[JsonValue],
) -> Result<Column, TableTranslationError> {
    let mut ty: Option<ColumnType> = None;
    let mut values = Vec::with_capacity(cells.len());

    for (row, cell) in cells.iter().enumerate() {
        let value = match cell {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => {
                let n = n.as_f64().ok_or(TableTranslationError::NonScalarValue {
                    column: name.to_string(),
                    row,
                })?;
                Value::Number(n)
            }
            JsonValue::String(s) => Value::Text(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => {
                return Err(TableTranslationError::NonScalarValue {
                    column: name.to_string(),
                    row,
                });
            }
        };

        if let Some(kind) = value.kind() {
            match ty {
                None => ty = Some(kind),
                Some(declared) if declared != kind => {
                    return Err(TableTranslationError::MixedTypes {
                        column: name.to_string(),
                        first: type_name(declared),
                        second: value.type_name(),
                    });
                }
                Some(_) => {}
            }
        }
        values.push(value);
    }

    // All-null and empty columns default to text.
    let ty = ty.unwrap_or(ColumnType::Text);
    Ok(Column::new(name, ty, values).expect("cells match the inferred column type"))
}

fn type_name(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Text => "text",
        ColumnType::Number => "number",
        ColumnType::Bool => "bool",
        ColumnType::Timestamp => "timestamp",
    }
}
