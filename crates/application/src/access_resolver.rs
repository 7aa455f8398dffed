use std::collections::BTreeSet;

use hagwon_domain::{Capability, Permission, RoleAccessTable, RolePermissionPatches, UserRole};
use tracing::{debug, error, warn};

/// Resolves a role's effective capabilities from the default table and an
/// optional per-academy override snapshot.
///
/// Resolution is a pure function of its inputs; approval status must be
/// checked by the caller.
#[derive(Debug, Clone, Copy)]
pub struct AccessResolver<'a, C> {
    default_table: &'a RoleAccessTable<C>,
    super_role: UserRole,
}

impl<'a, C: Capability> AccessResolver<'a, C> {
    /// Creates a resolver over `default_table`; `super_role` always resolves
    /// to the whole capability universe.
    #[must_use]
    pub fn new(default_table: &'a RoleAccessTable<C>, super_role: UserRole) -> Self {
        Self {
            default_table,
            super_role,
        }
    }

    /// Returns the effective capability set for `role`.
    ///
    /// A non-empty override entry wins. A missing or empty override entry
    /// falls back to the default entry, and a role absent from every table
    /// resolves to nothing.
    #[must_use]
    pub fn resolve_effective_capabilities(
        &self,
        role: UserRole,
        override_table: Option<&RoleAccessTable<C>>,
    ) -> BTreeSet<C> {
        if role == self.super_role {
            return C::universe().iter().copied().collect();
        }

        let Some(override_table) = override_table else {
            return self.default_entry(role).unwrap_or_else(|| {
                error!(
                    role = role.as_str(),
                    "no override table loaded and role has no default access entry"
                );
                BTreeSet::new()
            });
        };

        if let Some(entry) = override_table.get(role).filter(|entry| !entry.is_empty()) {
            return entry.clone();
        }

        debug!(
            role = role.as_str(),
            "override entry missing or empty, using default access entry"
        );
        self.default_entry(role).unwrap_or_else(|| {
            warn!(
                role = role.as_str(),
                "role is missing from both the override and the default access table"
            );
            BTreeSet::new()
        })
    }

    /// Returns whether `role` holds `capability`.
    #[must_use]
    pub fn has_capability(
        &self,
        role: UserRole,
        capability: C,
        override_table: Option<&RoleAccessTable<C>>,
    ) -> bool {
        if role == self.super_role {
            return true;
        }

        self.resolve_effective_capabilities(role, override_table)
            .contains(&capability)
    }

    /// Returns every capability `role` holds, in universe order.
    #[must_use]
    pub fn all_accessible_capabilities(
        &self,
        role: UserRole,
        override_table: Option<&RoleAccessTable<C>>,
    ) -> Vec<C> {
        if role == self.super_role {
            return C::universe().to_vec();
        }

        let effective = self.resolve_effective_capabilities(role, override_table);
        C::universe()
            .iter()
            .copied()
            .filter(|capability| effective.contains(capability))
            .collect()
    }

    fn default_entry(&self, role: UserRole) -> Option<BTreeSet<C>> {
        self.default_table.get(role).cloned()
    }
}

impl AccessResolver<'_, Permission> {
    /// Returns the permissions of `role` after merging `patches` onto the
    /// default entry.
    ///
    /// Roles without a default entry resolve to nothing even when patched.
    #[must_use]
    pub fn resolve_patched_capabilities(
        &self,
        role: UserRole,
        patches: Option<&RolePermissionPatches>,
    ) -> BTreeSet<Permission> {
        if role == self.super_role {
            return Permission::all().iter().copied().collect();
        }

        let Some(base) = self.default_table.get(role) else {
            warn!(
                role = role.as_str(),
                "role has no default permission entry, ignoring patches"
            );
            return BTreeSet::new();
        };

        match patches {
            Some(patches) => patches.apply(role, base),
            None => base.clone(),
        }
    }
}
