use super::*;

use hagwon_domain::{RoleAccessTable, RolePermissionPatches};
use tracing::info;

impl AccessService {
    /// Replaces the academy's tab override table and emits an audit event.
    pub async fn update_tab_overrides(
        &self,
        actor: &UserIdentity,
        table: RoleAccessTable<AppTab>,
    ) -> AppResult<()> {
        self.require_super_role(actor).await?;

        let roles = table.roles().collect::<Vec<_>>();
        let detail = format!("saved tab overrides for {} roles", roles.len());

        self.config_repository
            .save_tab_overrides(actor.tenant_id(), table)
            .await?;

        info!(tenant_id = %actor.tenant_id(), roles = roles.len(), "tab overrides updated");

        self.append_audit_event(
            actor,
            AuditAction::AccessTabOverridesUpdated,
            AuditTarget::TabOverrides,
            roles,
            detail,
        )
        .await
    }

    /// Replaces the academy's permission patch table and emits an audit event.
    ///
    /// The super role always holds every permission, so patches for it are
    /// rejected.
    pub async fn update_permission_patches(
        &self,
        actor: &UserIdentity,
        patches: RolePermissionPatches,
    ) -> AppResult<()> {
        self.require_super_role(actor).await?;

        if patches
            .for_role(UserRole::SUPER)
            .is_some_and(|patch| !patch.is_empty())
        {
            return Err(AppError::Validation(format!(
                "permissions of the '{}' role cannot be patched",
                UserRole::SUPER.as_str()
            )));
        }

        let roles = patches.roles().collect::<Vec<_>>();
        let detail = format!("saved permission patches for {} roles", roles.len());

        self.config_repository
            .save_permission_patches(actor.tenant_id(), patches)
            .await?;

        info!(tenant_id = %actor.tenant_id(), roles = roles.len(), "permission patches updated");

        self.append_audit_event(
            actor,
            AuditAction::AccessPermissionPatchesUpdated,
            AuditTarget::PermissionPatches,
            roles,
            detail,
        )
        .await
    }

    /// Returns the roles the caller may hand out, highest first.
    pub async fn assignable_roles(&self, actor: &UserIdentity) -> AppResult<Vec<UserRole>> {
        Ok(self
            .approved_profile(actor)
            .await?
            .map(|profile| profile.role().assignable_roles())
            .unwrap_or_default())
    }

    /// Changes another account's role and emits an audit event.
    ///
    /// The caller needs the role-change permission and must outrank both the
    /// target's current role and the new role.
    pub async fn change_user_role(
        &self,
        actor: &UserIdentity,
        target_subject: &str,
        new_role: UserRole,
    ) -> AppResult<UserProfile> {
        self.require_permission(actor, Permission::UsersChangeRole)
            .await?;
        let actor_profile = self.require_approved_profile(actor).await?;

        let target = self
            .profile_repository
            .find_profile(actor.tenant_id(), target_subject)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "user '{target_subject}' does not exist in tenant '{}'",
                    actor.tenant_id()
                ))
            })?;

        let previous_role = target.role();
        if !actor_profile.role().can_assign(previous_role) {
            return Err(AppError::Forbidden(format!(
                "role '{}' cannot manage users with role '{}'",
                actor_profile.role().as_str(),
                previous_role.as_str()
            )));
        }
        if !actor_profile.role().can_assign(new_role) {
            return Err(AppError::Forbidden(format!(
                "role '{}' cannot assign role '{}'",
                actor_profile.role().as_str(),
                new_role.as_str()
            )));
        }

        self.profile_repository
            .save_role(actor.tenant_id(), target_subject, new_role)
            .await?;

        self.append_audit_event(
            actor,
            AuditAction::UserRoleChanged,
            AuditTarget::UserProfile(target_subject.to_owned()),
            vec![previous_role, new_role],
            format!(
                "changed role of '{target_subject}' from '{}' to '{}'",
                previous_role.as_str(),
                new_role.as_str()
            ),
        )
        .await?;

        Ok(target.with_role(new_role))
    }
}
