use async_trait::async_trait;
use sqlx::PgPool;

use hagwon_application::{AuditEvent, AuditRepository};
use hagwon_core::{AppError, AppResult};
use tracing::debug;

/// PostgreSQL-backed log of access administration changes.
///
/// Each row records the acting subject, the changed table or account and the
/// roles the change touched, so a tenant's role history can be queried by
/// account or by role without parsing the free-form detail.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let affected_roles = event
            .affected_role_names()
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        sqlx::query(
            r#"
            INSERT INTO access_audit_events (
                tenant_id,
                actor_subject,
                action,
                target_kind,
                target_subject,
                affected_roles,
                detail
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.tenant_id.as_uuid())
        .bind(event.actor_subject.as_str())
        .bind(event.action.as_str())
        .bind(event.target.kind())
        .bind(event.target.subject())
        .bind(affected_roles)
        .bind(event.detail.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to record '{}' for tenant '{}': {error}",
                event.action.as_str(),
                event.tenant_id
            ))
        })?;

        debug!(
            tenant_id = %event.tenant_id,
            action = event.action.as_str(),
            target = event.target.kind(),
            "access audit event stored"
        );

        Ok(())
    }
}
