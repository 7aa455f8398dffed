use std::sync::Arc;

use hagwon_core::{AppError, AppResult, UserIdentity};
use hagwon_domain::{
    AppTab, AuditAction, Permission, TabGroup, UserProfile, UserRole, default_permission_table,
    default_tab_table,
};
use tracing::debug;

use crate::access_ports::{AccessConfigRepository, UserProfileRepository};
use crate::{AccessResolver, AuditEvent, AuditRepository, AuditTarget};

mod administration;
mod permissions;
mod tabs;

/// One navigation group narrowed to the tabs a caller may open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibleTabGroup {
    /// Group definition.
    pub group: TabGroup,
    /// Accessible tabs of the group, in display order.
    pub tabs: Vec<AppTab>,
}

/// Application service for tab visibility, granular permissions and role
/// administration.
#[derive(Clone)]
pub struct AccessService {
    config_repository: Arc<dyn AccessConfigRepository>,
    profile_repository: Arc<dyn UserProfileRepository>,
    audit_repository: Arc<dyn AuditRepository>,
    tab_resolver: AccessResolver<'static, AppTab>,
    permission_resolver: AccessResolver<'static, Permission>,
}

impl AccessService {
    /// Creates a new access service over the compiled-in default tables.
    #[must_use]
    pub fn new(
        config_repository: Arc<dyn AccessConfigRepository>,
        profile_repository: Arc<dyn UserProfileRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            config_repository,
            profile_repository,
            audit_repository,
            tab_resolver: AccessResolver::new(default_tab_table(), UserRole::SUPER),
            permission_resolver: AccessResolver::new(default_permission_table(), UserRole::SUPER),
        }
    }

    /// Returns the caller's profile when it may resolve capabilities.
    async fn approved_profile(&self, actor: &UserIdentity) -> AppResult<Option<UserProfile>> {
        let profile = self
            .profile_repository
            .find_profile(actor.tenant_id(), actor.subject())
            .await?;

        Ok(profile.filter(|profile| {
            let approved = profile.status().is_approved();
            if !approved {
                debug!(
                    tenant_id = %actor.tenant_id(),
                    subject = actor.subject(),
                    status = profile.status().as_str(),
                    "profile is not approved, resolving no capabilities"
                );
            }
            approved
        }))
    }

    /// Returns the role capabilities resolve for, honoring a super-role
    /// preview of `simulated_role`.
    async fn resolution_role(
        &self,
        actor: &UserIdentity,
        simulated_role: Option<UserRole>,
    ) -> AppResult<Option<UserRole>> {
        let actual = self
            .approved_profile(actor)
            .await?
            .map(|profile| profile.role());
        let effective = UserRole::effective_role(actual, simulated_role);

        if let (Some(actual), Some(effective)) = (actual, effective)
            && actual != effective
        {
            debug!(
                tenant_id = %actor.tenant_id(),
                subject = actor.subject(),
                actual_role = actual.as_str(),
                simulated_role = effective.as_str(),
                "resolving capabilities for simulated role"
            );
        }

        Ok(effective)
    }

    /// Returns the caller's approved profile.
    pub async fn current_profile(&self, actor: &UserIdentity) -> AppResult<UserProfile> {
        self.require_approved_profile(actor).await
    }

    async fn require_approved_profile(&self, actor: &UserIdentity) -> AppResult<UserProfile> {
        self.approved_profile(actor).await?.ok_or_else(|| {
            AppError::Forbidden(format!(
                "subject '{}' has no approved profile in tenant '{}'",
                actor.subject(),
                actor.tenant_id()
            ))
        })
    }

    async fn require_super_role(&self, actor: &UserIdentity) -> AppResult<UserProfile> {
        let profile = self.require_approved_profile(actor).await?;
        if profile.role() != UserRole::SUPER {
            return Err(AppError::Forbidden(format!(
                "only the '{}' role may change access configuration",
                UserRole::SUPER.as_str()
            )));
        }

        Ok(profile)
    }

    async fn append_audit_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        target: AuditTarget,
        affected_roles: Vec<UserRole>,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                tenant_id: actor.tenant_id(),
                actor_subject: actor.subject().to_owned(),
                action,
                target,
                affected_roles,
                detail: Some(detail),
            })
            .await
    }
}
