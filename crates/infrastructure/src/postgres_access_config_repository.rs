use async_trait::async_trait;
use hagwon_application::AccessConfigRepository;
use hagwon_core::{AppError, AppResult, TenantId};
use hagwon_domain::{AppTab, RoleAccessTable, RolePermissionPatches};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::PgPool;

/// PostgreSQL-backed access configuration repository.
///
/// Each table holds one JSONB document per tenant.
#[derive(Clone)]
pub struct PostgresAccessConfigRepository {
    pool: PgPool,
}

impl PostgresAccessConfigRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_document<T: DeserializeOwned>(
        &self,
        query: &'static str,
        tenant_id: TenantId,
        label: &str,
    ) -> AppResult<Option<T>> {
        let document = sqlx::query_scalar::<_, String>(query)
            .bind(tenant_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load {label}: {error}")))?;

        document
            .map(|value| {
                serde_json::from_str::<T>(value.as_str()).map_err(|error| {
                    AppError::Internal(format!(
                        "stored {label} for tenant '{tenant_id}' is invalid: {error}"
                    ))
                })
            })
            .transpose()
    }

    async fn save_document<T: Serialize + Sync>(
        &self,
        query: &'static str,
        tenant_id: TenantId,
        document: &T,
        label: &str,
    ) -> AppResult<()> {
        let document = serde_json::to_string(document).map_err(|error| {
            AppError::Internal(format!("failed to serialize {label}: {error}"))
        })?;

        sqlx::query(query)
            .bind(tenant_id.as_uuid())
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to save {label}: {error}")))?;

        Ok(())
    }
}

#[async_trait]
impl AccessConfigRepository for PostgresAccessConfigRepository {
    async fn find_tab_overrides(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<Option<RoleAccessTable<AppTab>>> {
        self.find_document(
            r#"
            SELECT document::text
            FROM access_tab_overrides
            WHERE tenant_id = $1
            "#,
            tenant_id,
            "tab overrides",
        )
        .await
    }

    async fn save_tab_overrides(
        &self,
        tenant_id: TenantId,
        table: RoleAccessTable<AppTab>,
    ) -> AppResult<()> {
        self.save_document(
            r#"
            INSERT INTO access_tab_overrides (tenant_id, document)
            VALUES ($1, $2::jsonb)
            ON CONFLICT (tenant_id)
            DO UPDATE SET document = EXCLUDED.document, updated_at = NOW()
            "#,
            tenant_id,
            &table,
            "tab overrides",
        )
        .await
    }

    async fn find_permission_patches(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<Option<RolePermissionPatches>> {
        self.find_document(
            r#"
            SELECT document::text
            FROM access_permission_patches
            WHERE tenant_id = $1
            "#,
            tenant_id,
            "permission patches",
        )
        .await
    }

    async fn save_permission_patches(
        &self,
        tenant_id: TenantId,
        patches: RolePermissionPatches,
    ) -> AppResult<()> {
        self.save_document(
            r#"
            INSERT INTO access_permission_patches (tenant_id, document)
            VALUES ($1, $2::jsonb)
            ON CONFLICT (tenant_id)
            DO UPDATE SET document = EXCLUDED.document, updated_at = NOW()
            "#,
            tenant_id,
            &patches,
            "permission patches",
        )
        .await
    }
}

#[cfg(test)]
mod tests;
