use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Relational join semantics for a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    Left,
    Right,
    Outer,
    Inner,
}

impl JoinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Outer => "outer",
            Self::Inner => "inner",
        }
    }
}

impl FromStr for JoinKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "outer" => Ok(Self::Outer),
            "inner" => Ok(Self::Inner),
            other => Err(TypeError::InvalidJoinType(other.to_string())),
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strategy for resolving non-key column name collisions.
///
/// `Override` drops the destination's colliding columns so the source's
/// versions win; `Rename` keeps both by suffixing the source's names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DupPolicy {
    Override,
    Rename,
}

impl DupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Rename => "rename",
        }
    }
}

impl FromStr for DupPolicy {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "override" => Ok(Self::Override),
            "rename" => Ok(Self::Rename),
            other => Err(TypeError::InvalidDupPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for DupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied merge parameters.
///
/// `left_on` names the join key in the destination (stored) table,
/// `right_on` names it in the incoming source table. Both must exist and
/// hold unique values; the merge engine verifies this before any work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSpec {
    pub how: JoinKind,
    pub left_on: String,
    pub right_on: String,
    pub dup_policy: DupPolicy,
}

impl MergeSpec {
    pub fn new(
        how: JoinKind,
        left_on: impl Into<String>,
        right_on: impl Into<String>,
        dup_policy: DupPolicy,
    ) -> Self {
        Self {
            how,
            left_on: left_on.into(),
            right_on: right_on.into(),
            dup_policy,
        }
    }
}
