use super::*;

impl AccessService {
    /// Returns the caller's effective permissions in canonical order.
    ///
    /// Unknown or unapproved accounts get no permissions. A super-role caller
    /// may preview the permissions of `simulated_role`; other callers ignore
    /// it.
    pub async fn effective_permissions(
        &self,
        actor: &UserIdentity,
        simulated_role: Option<UserRole>,
    ) -> AppResult<Vec<Permission>> {
        let Some(role) = self.resolution_role(actor, simulated_role).await? else {
            return Ok(Vec::new());
        };

        let patches = self
            .config_repository
            .find_permission_patches(actor.tenant_id())
            .await?;
        let effective = self
            .permission_resolver
            .resolve_patched_capabilities(role, patches.as_ref());

        Ok(Permission::all()
            .iter()
            .copied()
            .filter(|permission| effective.contains(permission))
            .collect())
    }

    /// Returns whether the caller currently holds `permission`.
    ///
    /// Always checked against the caller's own role.
    pub async fn has_permission(
        &self,
        actor: &UserIdentity,
        permission: Permission,
    ) -> AppResult<bool> {
        Ok(self
            .effective_permissions(actor, None)
            .await?
            .contains(&permission))
    }

    /// Ensures the caller holds `permission`.
    pub async fn require_permission(
        &self,
        actor: &UserIdentity,
        permission: Permission,
    ) -> AppResult<()> {
        if self.has_permission(actor, permission).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{}' is missing permission '{}' in tenant '{}'",
            actor.subject(),
            permission.as_str(),
            actor.tenant_id()
        )))
    }
}
