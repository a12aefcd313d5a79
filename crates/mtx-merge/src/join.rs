//! Row-level join execution over a validated request and reconciliation
//! plan.
//!
//! Keys are unique on both sides once validation has passed, so every key
//! matches at most one row per table and the output cardinality is fully
//! determined by the join kind.

use std::collections::{HashMap, HashSet};

use mtx_types::{Column, JoinKind, MergeSpec, Table, Value};

use crate::error::{MergeError, MergeResult};
use crate::reconcile::ReconciliationPlan;

/// Execute the join and assemble the replacement table.
///
/// Output columns are the surviving destination columns in destination
/// order (key included once, under the destination's name), followed by the
/// surviving source columns in source order minus the source key column.
/// Row order: destination rows first, in destination order; unmatched
/// source-only rows (right/outer) appended after, in source order.
pub fn execute(
    destination: &Table,
    source: &Table,
    spec: &MergeSpec,
    plan: &ReconciliationPlan,
) -> MergeResult<Table> {
    let left_key = destination.column(&spec.left_on).ok_or_else(|| {
        MergeError::JoinExecutionError(format!("destination key {} vanished", spec.left_on))
    })?;
    let right_key = source.column(&spec.right_on).ok_or_else(|| {
        MergeError::JoinExecutionError(format!("source key {} vanished", spec.right_on))
    })?;

    // Unique keys per side, so a plain value → row-index map suffices.
    let src_by_key: HashMap<&Value, usize> = right_key
        .values()
        .iter()
        .enumerate()
        .map(|(row, value)| (value, row))
        .collect();
    let dst_keys: HashSet<&Value> = left_key.values().iter().collect();

    // Row plan: (destination row, source row), either side absent for
    // unmatched rows.
    let mut rows: Vec<(Option<usize>, Option<usize>)> = Vec::new();
    match spec.how {
        JoinKind::Inner => {
            for (row, key) in left_key.values().iter().enumerate() {
                if let Some(&src_row) = src_by_key.get(key) {
                    rows.push((Some(row), Some(src_row)));
                }
            }
        }
        JoinKind::Left => {
            for (row, key) in left_key.values().iter().enumerate() {
                rows.push((Some(row), src_by_key.get(key).copied()));
            }
        }
        JoinKind::Right => {
            for (row, key) in left_key.values().iter().enumerate() {
                if let Some(&src_row) = src_by_key.get(key) {
                    rows.push((Some(row), Some(src_row)));
                }
            }
            append_source_only_rows(&mut rows, right_key, &dst_keys);
        }
        JoinKind::Outer => {
            for (row, key) in left_key.values().iter().enumerate() {
                rows.push((Some(row), src_by_key.get(key).copied()));
            }
            append_source_only_rows(&mut rows, right_key, &dst_keys);
        }
    }
    tracing::debug!(
        how = spec.how.as_str(),
        rows = rows.len(),
        "assembled join row plan"
    );

    let mut output: Vec<Column> = Vec::new();

    // Surviving destination columns, in destination order.
    for column in destination.columns() {
        if plan.columns_to_drop.contains(column.name()) {
            continue;
        }
        let is_key = column.name() == spec.left_on;
        let values: Vec<Value> = rows
            .iter()
            .map(|(dst_row, src_row)| match dst_row {
                Some(row) => column.value(*row).clone(),
                // Source-only row: the key carries the source key value,
                // everything else is null-filled.
                None if is_key => match src_row {
                    Some(row) => right_key.value(*row).clone(),
                    None => Value::Null,
                },
                None => Value::Null,
            })
            .collect();
        output.push(Column::new(column.name(), column.ty(), values)?);
    }

    // Surviving source columns under their final names, minus the key.
    for column in source.columns() {
        if column.name() == spec.right_on {
            continue;
        }
        let values: Vec<Value> = rows
            .iter()
            .map(|(_, src_row)| match src_row {
                Some(row) => column.value(*row).clone(),
                None => Value::Null,
            })
            .collect();
        output.push(Column::new(
            plan.final_name(column.name()),
            column.ty(),
            values,
        )?);
    }

    if output.is_empty() {
        return Err(MergeError::JoinExecutionError(
            "join produced zero columns".into(),
        ));
    }
    let mut names = HashSet::with_capacity(output.len());
    for column in &output {
        if !names.insert(column.name()) {
            return Err(MergeError::JoinExecutionError(format!(
                "ambiguous column name after reconciliation: {}",
                column.name()
            )));
        }
    }

    Ok(Table::new(output)?)
}

fn append_source_only_rows(
    rows: &mut Vec<(Option<usize>, Option<usize>)>,
    right_key: &Column,
    dst_keys: &HashSet<&Value>,
) {
    for (row, key) in right_key.values().iter().enumerate() {
        if !dst_keys.contains(key) {
            rows.push((None, Some(row)));
        }
    }
}
