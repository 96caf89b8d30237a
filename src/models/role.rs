//! Role model.
//!
//! Roles are the executing functions of a process: engineer, reviewer,
//! project lead. Each role carries an hourly cost rate used by the cost
//! rollup. Roles are immutable reference data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A role that executes activities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Hourly cost rate. `None` = use the engine's default rate.
    pub rate_per_hour: Option<f64>,
}

impl Role {
    /// Creates a new role with no rate set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            rate_per_hour: None,
        }
    }

    /// Sets the role name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the hourly rate.
    pub fn with_rate(mut self, rate_per_hour: f64) -> Self {
        self.rate_per_hour = Some(rate_per_hour);
        self
    }
}

/// Lookup table of roles by id.
///
/// An unknown role id or an unset rate resolves to the caller-supplied
/// default — a configuration fallback, not an error. Activities referencing
/// roles outside the directory still schedule; they are just costed at the
/// default rate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleDirectory {
    roles: HashMap<String, Role>,
}

impl RoleDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from a list of roles. Later duplicates win.
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    /// Adds a role, replacing any existing role with the same id.
    pub fn insert(&mut self, role: Role) {
        self.roles.insert(role.id.clone(), role);
    }

    /// Looks up a role by id.
    pub fn get(&self, role_id: &str) -> Option<&Role> {
        self.roles.get(role_id)
    }

    /// Resolves the hourly rate for a role, falling back to `default_rate`
    /// when the role is unknown or its rate is unset.
    pub fn rate_or_default(&self, role_id: &str, default_rate: f64) -> f64 {
        self.roles
            .get(role_id)
            .and_then(|r| r.rate_per_hour)
            .unwrap_or(default_rate)
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_builder() {
        let r = Role::new("R1").with_name("Design Engineer").with_rate(95.0);
        assert_eq!(r.id, "R1");
        assert_eq!(r.name, "Design Engineer");
        assert_eq!(r.rate_per_hour, Some(95.0));
    }

    #[test]
    fn test_rate_or_default_with_rate() {
        let dir = RoleDirectory::from_roles(vec![Role::new("R1").with_rate(80.0)]);
        assert!((dir.rate_or_default("R1", 105.0) - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_rate_or_default_unset_rate() {
        let dir = RoleDirectory::from_roles(vec![Role::new("R1")]);
        assert!((dir.rate_or_default("R1", 105.0) - 105.0).abs() < 1e-10);
    }

    #[test]
    fn test_rate_or_default_unknown_role() {
        let dir = RoleDirectory::new();
        assert!((dir.rate_or_default("missing", 105.0) - 105.0).abs() < 1e-10);
    }

    #[test]
    fn test_insert_replaces() {
        let mut dir = RoleDirectory::new();
        dir.insert(Role::new("R1").with_rate(50.0));
        dir.insert(Role::new("R1").with_rate(60.0));
        assert_eq!(dir.len(), 1);
        assert!((dir.rate_or_default("R1", 0.0) - 60.0).abs() < 1e-10);
    }
}
