use async_trait::async_trait;
use hagwon_core::{AppResult, TenantId};
use hagwon_domain::{AppTab, RoleAccessTable, RolePermissionPatches, UserProfile, UserRole};

/// Repository port for per-academy access configuration documents.
///
/// Each academy holds at most one tab override table and one permission
/// patch table; saving replaces the whole document.
#[async_trait]
pub trait AccessConfigRepository: Send + Sync {
    /// Returns the tab override table, if one was ever saved.
    async fn find_tab_overrides(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<Option<RoleAccessTable<AppTab>>>;

    /// Replaces the tab override table.
    async fn save_tab_overrides(
        &self,
        tenant_id: TenantId,
        table: RoleAccessTable<AppTab>,
    ) -> AppResult<()>;

    /// Returns the permission patch table, if one was ever saved.
    async fn find_permission_patches(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<Option<RolePermissionPatches>>;

    /// Replaces the permission patch table.
    async fn save_permission_patches(
        &self,
        tenant_id: TenantId,
        patches: RolePermissionPatches,
    ) -> AppResult<()>;
}

/// Repository port for staff account profiles.
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Finds a profile by identity-provider subject.
    async fn find_profile(
        &self,
        tenant_id: TenantId,
        subject: &str,
    ) -> AppResult<Option<UserProfile>>;

    /// Stores a new role for an existing profile.
    async fn save_role(&self, tenant_id: TenantId, subject: &str, role: UserRole) -> AppResult<()>;
}
