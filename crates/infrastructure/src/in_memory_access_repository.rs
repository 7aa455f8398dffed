use std::collections::HashMap;

use async_trait::async_trait;
use hagwon_application::{AccessConfigRepository, UserProfileRepository};
use hagwon_core::{AppError, AppResult, TenantId};
use hagwon_domain::{AppTab, RoleAccessTable, RolePermissionPatches, UserProfile, UserRole};
use tokio::sync::RwLock;

/// In-memory access configuration and user profile repository.
#[derive(Debug, Default)]
pub struct InMemoryAccessRepository {
    tab_overrides: RwLock<HashMap<TenantId, RoleAccessTable<AppTab>>>,
    permission_patches: RwLock<HashMap<TenantId, RolePermissionPatches>>,
    profiles: RwLock<HashMap<(TenantId, String), UserProfile>>,
}

impl InMemoryAccessRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tab_overrides: RwLock::new(HashMap::new()),
            permission_patches: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces profiles for one tenant.
    pub async fn insert_profiles(
        &self,
        tenant_id: TenantId,
        profiles: impl IntoIterator<Item = UserProfile>,
    ) {
        let mut stored = self.profiles.write().await;
        for profile in profiles {
            stored.insert((tenant_id, profile.subject().to_owned()), profile);
        }
    }
}

#[async_trait]
impl AccessConfigRepository for InMemoryAccessRepository {
    async fn find_tab_overrides(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<Option<RoleAccessTable<AppTab>>> {
        Ok(self.tab_overrides.read().await.get(&tenant_id).cloned())
    }

    async fn save_tab_overrides(
        &self,
        tenant_id: TenantId,
        table: RoleAccessTable<AppTab>,
    ) -> AppResult<()> {
        self.tab_overrides.write().await.insert(tenant_id, table);
        Ok(())
    }

    async fn find_permission_patches(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<Option<RolePermissionPatches>> {
        Ok(self.permission_patches.read().await.get(&tenant_id).cloned())
    }

    async fn save_permission_patches(
        &self,
        tenant_id: TenantId,
        patches: RolePermissionPatches,
    ) -> AppResult<()> {
        self.permission_patches
            .write()
            .await
            .insert(tenant_id, patches);
        Ok(())
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryAccessRepository {
    async fn find_profile(
        &self,
        tenant_id: TenantId,
        subject: &str,
    ) -> AppResult<Option<UserProfile>> {
        Ok(self
            .profiles
            .read()
            .await
            .get(&(tenant_id, subject.to_owned()))
            .cloned())
    }

    async fn save_role(&self, tenant_id: TenantId, subject: &str, role: UserRole) -> AppResult<()> {
        let key = (tenant_id, subject.to_owned());
        let mut profiles = self.profiles.write().await;
        let profile = profiles.remove(&key).ok_or_else(|| {
            AppError::NotFound(format!(
                "user '{subject}' does not exist in tenant '{tenant_id}'"
            ))
        })?;

        profiles.insert(key, profile.with_role(role));
        Ok(())
    }
}
