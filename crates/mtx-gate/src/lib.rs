//! Workflow admission for the MTX workflow matrix service.
//!
//! Every mutating operation on a workflow's table passes through the
//! [`WorkflowGate`] before touching any state: existence, ownership
//! (superusers bypass), and an advisory per-workflow lock, enforced in
//! that order. The merge engine stays a pure function; admission is
//! entirely the caller's job.

pub mod error;
pub mod gate;
pub mod identity;

pub use error::{GateError, GateResult};
pub use gate::{LockGuard, WorkflowGate, WorkflowRecord};
pub use identity::Identity;
