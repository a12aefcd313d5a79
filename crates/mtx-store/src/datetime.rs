//! Heuristic date/time column detection.
//!
//! A text column whose non-null values all parse as a date or date-time is
//! converted to a timestamp column. Runs at ingestion and before
//! persistence — never inside the merge engine.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use mtx_types::{Column, ColumnType, Table, Value};

/// Accepted textual renditions, tried in order per value.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d"];

/// Parse one cell as a timestamp. Naive date-times are taken as UTC;
/// bare dates become midnight UTC.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, format) {
            return Some(t.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }
    None
}

/// Convert every uniformly date/time-like text column to a timestamp
/// column. Columns with zero non-null values, and columns where any value
/// fails to parse, are left untouched.
pub fn detect_datetime_columns(table: &Table) -> Table {
    let columns: Vec<Column> = table
        .columns()
        .iter()
        .map(|column| convert_if_datetime(column).unwrap_or_else(|| column.clone()))
        .collect();
    Table::new(columns).expect("conversion preserves names and lengths")
}

fn convert_if_datetime(column: &Column) -> Option<Column> {
    if column.ty() != ColumnType::Text {
        return None;
    }

    let mut converted = Vec::with_capacity(column.len());
    let mut non_null = 0usize;
    for value in column.values() {
        match value {
            Value::Null => converted.push(Value::Null),
            Value::Text(s) => {
                converted.push(Value::Timestamp(parse_datetime(s)?));
                non_null += 1;
            }
            _ => return None,
        }
    }
    if non_null == 0 {
        return None;
    }

    tracing::debug!(column = column.name(), "detected date/time column");
    Some(
        Column::new(column.name(), ColumnType::Timestamp, converted)
            .expect("converted values are timestamps"),
    )
}
