//! Structural precondition checks, run before any transformation.
//!
//! Checks are ordered and short-circuit on the first failure: destination
//! key exists, destination key is unique, source key exists, source key is
//! unique. Join kind and duplicate-column policy are closed enums parsed at
//! the wire boundary, so their domain is already guaranteed here.

use std::collections::HashSet;

use mtx_types::{Column, MergeSpec, Table};

use crate::error::{MergeError, MergeResult, Side};

/// Validate a merge request against the destination and source tables.
///
/// Pure: no side effects, neither table is touched. On failure the returned
/// error names the offending column and side so the caller can correct the
/// request.
pub fn validate(destination: &Table, source: &Table, spec: &MergeSpec) -> MergeResult<()> {
    let left = destination
        .column(&spec.left_on)
        .ok_or_else(|| MergeError::KeyNotFound {
            side: Side::Destination,
            column: spec.left_on.clone(),
        })?;
    ensure_unique(left, Side::Destination)?;

    let right = source
        .column(&spec.right_on)
        .ok_or_else(|| MergeError::KeyNotFound {
            side: Side::Source,
            column: spec.right_on.clone(),
        })?;
    ensure_unique(right, Side::Source)?;

    Ok(())
}

/// O(n) set-membership scan. Two nulls count as duplicates: a null cannot
/// guarantee a join key, so at most one is tolerated per key column.
fn ensure_unique(column: &Column, side: Side) -> MergeResult<()> {
    let mut seen = HashSet::with_capacity(column.len());
    for value in column.values() {
        if !seen.insert(value) {
            return Err(MergeError::KeyNotUnique {
                side,
                column: column.name().to_string(),
            });
        }
    }
    Ok(())
}
