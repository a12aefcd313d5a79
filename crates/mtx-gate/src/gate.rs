use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use mtx_types::WorkflowId;

use crate::error::{GateError, GateResult};
use crate::identity::Identity;

/// A workflow's ownership record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowRecord {
    pub id: WorkflowId,
    pub owner: String,
}

#[derive(Default)]
struct Inner {
    records: HashMap<WorkflowId, WorkflowRecord>,
    locked: HashSet<WorkflowId>,
}

/// Workflow registry and advisory lock table.
///
/// Every operation that touches a workflow's table must `acquire` the
/// workflow first. Acquisition checks, in order: the workflow exists, the
/// caller owns it (superusers bypass this), and no other operation holds
/// it. The returned [`LockGuard`] releases the lock on drop, so at most
/// one operation is in flight per workflow at a time.
///
/// The merge engine itself never sees this type; callers hold the guard
/// across load → merge → store and drop it afterwards.
#[derive(Clone)]
pub struct WorkflowGate {
    inner: Arc<Mutex<Inner>>,
}

impl WorkflowGate {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Register a new workflow owned by `owner`. Returns its identifier.
    pub fn create(&self, owner: &Identity) -> WorkflowId {
        let id = WorkflowId::new();
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner.records.insert(
            id,
            WorkflowRecord {
                id,
                owner: owner.name.clone(),
            },
        );
        tracing::debug!(workflow = %id, owner = %owner.name, "created workflow");
        id
    }

    pub fn exists(&self, workflow: &WorkflowId) -> bool {
        let inner = self.inner.lock().expect("lock poisoned");
        inner.records.contains_key(workflow)
    }

    pub fn owner(&self, workflow: &WorkflowId) -> Option<String> {
        let inner = self.inner.lock().expect("lock poisoned");
        inner.records.get(workflow).map(|r| r.owner.clone())
    }

    pub fn is_locked(&self, workflow: &WorkflowId) -> bool {
        let inner = self.inner.lock().expect("lock poisoned");
        inner.locked.contains(workflow)
    }

    /// Admit `identity` to operate on `workflow`, taking the advisory lock.
    pub fn acquire(
        &self,
        workflow: &WorkflowId,
        identity: &Identity,
    ) -> GateResult<LockGuard> {
        let mut guard = self.inner.lock().expect("lock poisoned");
        let inner = &mut *guard;

        let record = inner
            .records
            .get(workflow)
            .ok_or(GateError::WorkflowNotFound(*workflow))?;
        if !identity.is_superuser && record.owner != identity.name {
            return Err(GateError::NotOwned {
                workflow: *workflow,
                user: identity.name.clone(),
            });
        }
        if !inner.locked.insert(*workflow) {
            return Err(GateError::WorkflowLocked(*workflow));
        }

        Ok(LockGuard {
            inner: Arc::clone(&self.inner),
            workflow: *workflow,
        })
    }
}

impl Default for WorkflowGate {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WorkflowGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().expect("lock poisoned");
        f.debug_struct("WorkflowGate")
            .field("workflows", &inner.records.len())
            .field("locked", &inner.locked.len())
            .finish()
    }
}

/// Exclusive admission to one workflow. Dropping the guard releases it.
pub struct LockGuard {
    inner: Arc<Mutex<Inner>>,
    workflow: WorkflowId,
}

impl LockGuard {
    pub fn workflow(&self) -> WorkflowId {
        self.workflow
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // A poisoned registry cannot be repaired from a destructor; the
        // lock entry dies with the map in that case.
        if let Ok(mut inner) = self.inner.lock() {
            inner.locked.remove(&self.workflow);
        }
    }
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LockGuard({})", self.workflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_registers_workflow() {
        let gate = WorkflowGate::new();
        let id = gate.create(&Identity::user("alice"));
        assert!(gate.exists(&id));
        assert_eq!(gate.owner(&id), Some("alice".into()));
    }

    #[test]
    fn acquire_unknown_workflow() {
        let gate = WorkflowGate::new();
        let err = gate
            .acquire(&WorkflowId::new(), &Identity::user("alice"))
            .unwrap_err();
        assert!(matches!(err, GateError::WorkflowNotFound(_)));
    }

    #[test]
    fn owner_is_admitted() {
        let gate = WorkflowGate::new();
        let alice = Identity::user("alice");
        let id = gate.create(&alice);
        let guard = gate.acquire(&id, &alice).unwrap();
        assert_eq!(guard.workflow(), id);
    }

    #[test]
    fn non_owner_is_rejected() {
        let gate = WorkflowGate::new();
        let id = gate.create(&Identity::user("alice"));
        let err = gate.acquire(&id, &Identity::user("bob")).unwrap_err();
        assert_eq!(
            err,
            GateError::NotOwned {
                workflow: id,
                user: "bob".into()
            }
        );
    }

    #[test]
    fn superuser_bypasses_ownership() {
        let gate = WorkflowGate::new();
        let id = gate.create(&Identity::user("alice"));
        assert!(gate.acquire(&id, &Identity::superuser("root")).is_ok());
    }

    #[test]
    fn second_acquire_is_rejected_while_guard_lives() {
        let gate = WorkflowGate::new();
        let alice = Identity::user("alice");
        let id = gate.create(&alice);

        let _guard = gate.acquire(&id, &alice).unwrap();
        let err = gate.acquire(&id, &alice).unwrap_err();
        assert_eq!(err, GateError::WorkflowLocked(id));
    }

    #[test]
    fn lock_is_released_on_drop() {
        let gate = WorkflowGate::new();
        let alice = Identity::user("alice");
        let id = gate.create(&alice);

        {
            let _guard = gate.acquire(&id, &alice).unwrap();
            assert!(gate.is_locked(&id));
        }
        assert!(!gate.is_locked(&id));
        assert!(gate.acquire(&id, &alice).is_ok());
    }

    #[test]
    fn lock_also_blocks_superuser() {
        let gate = WorkflowGate::new();
        let alice = Identity::user("alice");
        let id = gate.create(&alice);

        let _guard = gate.acquire(&id, &alice).unwrap();
        let err = gate.acquire(&id, &Identity::superuser("root")).unwrap_err();
        assert_eq!(err, GateError::WorkflowLocked(id));
    }

    #[test]
    fn workflows_lock_independently() {
        let gate = WorkflowGate::new();
        let alice = Identity::user("alice");
        let a = gate.create(&alice);
        let b = gate.create(&alice);

        let _guard_a = gate.acquire(&a, &alice).unwrap();
        assert!(gate.acquire(&b, &alice).is_ok());
    }

    #[test]
    fn gate_clones_share_state() {
        let gate = WorkflowGate::new();
        let alice = Identity::user("alice");
        let id = gate.create(&alice);

        let clone = gate.clone();
        let _guard = clone.acquire(&id, &alice).unwrap();
        assert!(gate.is_locked(&id));
    }
}
