//! Column name reconciliation: computes the drop/rename plan applied before
//! a join so that destination and source column names are disjoint except
//! for the join key.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use mtx_types::{DupPolicy, MergeSpec, Table};

/// One entry of the ordered rename mapping. `from == to` for columns that
/// keep their name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

/// The derived plan for resolving non-key column name collisions.
///
/// Never caller-supplied. Under `Override` only `columns_to_drop` is
/// populated; under `Rename` only `rename_map`. The join key appears in
/// neither as anything but an identity mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationPlan {
    /// Destination columns removed before the join (override policy).
    pub columns_to_drop: BTreeSet<String>,
    /// Source column name → final name, in source column order (rename
    /// policy). Empty under override.
    pub rename_map: Vec<ColumnRename>,
}

impl ReconciliationPlan {
    /// The final name of a source column under this plan.
    pub fn final_name<'a>(&'a self, from: &'a str) -> &'a str {
        self.rename_map
            .iter()
            .find(|r| r.from == from)
            .map(|r| r.to.as_str())
            .unwrap_or(from)
    }

    /// Number of columns that actually change name.
    pub fn renamed_count(&self) -> usize {
        self.rename_map.iter().filter(|r| r.from != r.to).count()
    }

    /// Returns `true` if the plan drops nothing and renames nothing.
    pub fn is_identity(&self) -> bool {
        self.columns_to_drop.is_empty() && self.renamed_count() == 0
    }
}

/// Compute the reconciliation plan for a validated merge request.
///
/// Deterministic and order-dependent on source column order: running it
/// twice over the same inputs yields byte-identical plans.
pub fn plan(destination: &Table, source: &Table, spec: &MergeSpec) -> ReconciliationPlan {
    match spec.dup_policy {
        DupPolicy::Override => ReconciliationPlan {
            columns_to_drop: destination
                .column_names()
                .filter(|name| *name != spec.left_on && source.has_column(name))
                .map(String::from)
                .collect(),
            rename_map: Vec::new(),
        },
        DupPolicy::Rename => {
            let dst_names: HashSet<&str> = destination.column_names().collect();
            // Suffix candidates must avoid destination names, source names
            // (a later source column may keep its name), and names already
            // assigned in this pass.
            let mut taken: HashSet<String> = destination
                .column_names()
                .chain(source.column_names())
                .map(String::from)
                .collect();

            let mut rename_map = Vec::with_capacity(source.n_columns());
            for column in source.columns() {
                let name = column.name();
                if name == spec.right_on || !dst_names.contains(name) {
                    rename_map.push(ColumnRename {
                        from: name.to_string(),
                        to: name.to_string(),
                    });
                    continue;
                }

                let mut suffix = 1usize;
                let to = loop {
                    let candidate = format!("{name}_{suffix}");
                    if !taken.contains(&candidate) {
                        break candidate;
                    }
                    suffix += 1;
                };
                taken.insert(to.clone());
                tracing::debug!(from = name, to = %to, "renaming colliding source column");
                rename_map.push(ColumnRename {
                    from: name.to_string(),
                    to,
                });
            }

            ReconciliationPlan {
                columns_to_drop: BTreeSet::new(),
                rename_map,
            }
        }
    }
}
