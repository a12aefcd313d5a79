use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::value::{ColumnType, Value};

/// A named, uniformly typed sequence of values.
///
/// Every non-null value must match the column's declared [`ColumnType`];
/// this is checked at construction and never afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    ty: ColumnType,
    values: Vec<Value>,
}

impl Column {
    /// Build a column, verifying that every non-null value matches `ty`.
    pub fn new(
        name: impl Into<String>,
        ty: ColumnType,
        values: Vec<Value>,
    ) -> Result<Self, TypeError> {
        let name = name.into();
        for (row, value) in values.iter().enumerate() {
            if let Some(kind) = value.kind() {
                if kind != ty {
                    return Err(TypeError::TypeMismatch {
                        column: name,
                        row,
                        expected: ty,
                        actual: value.type_name(),
                    });
                }
            }
        }
        Ok(Self { name, ty, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ColumnType {
        self.ty
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The value at `row`, or `Null` past the end.
    pub fn value(&self, row: usize) -> &Value {
        self.values.get(row).unwrap_or(&Value::Null)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The same column under a different name. Values are untouched, so the
    /// type invariant carries over.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: self.ty,
            values: self.values.clone(),
        }
    }
}

/// An in-memory columnar table: ordered columns with unique, case-sensitive
/// names and equal lengths.
///
/// Tables are immutable once built. Transformations produce new tables
/// (copy-on-transform); nothing downstream mutates a table in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, verifying name uniqueness and the row-count invariant.
    pub fn new(columns: Vec<Column>) -> Result<Self, TypeError> {
        let expected = columns.first().map(Column::len).unwrap_or(0);
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name() == col.name()) {
                return Err(TypeError::DuplicateColumn(col.name().to_string()));
            }
            if col.len() != expected {
                return Err(TypeError::UnequalColumnLengths {
                    column: col.name().to_string(),
                    expected,
                    actual: col.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self { columns: Vec::new() }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows. Zero for a table with no columns.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Returns `true` if the table holds no columns at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
