use serde::{Deserialize, Serialize};

/// The caller on whose behalf an operation runs.
///
/// Superusers bypass the ownership check but not the lock: a workflow
/// busy with another operation stays off-limits to everyone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub is_superuser: bool,
}

impl Identity {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_superuser: false,
        }
    }

    pub fn superuser(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_superuser: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_privilege() {
        let u = Identity::user("alice");
        assert_eq!(u.name, "alice");
        assert!(!u.is_superuser);

        let s = Identity::superuser("root");
        assert!(s.is_superuser);
    }
}
