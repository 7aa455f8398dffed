//! Audit sink that writes events to the tracing output.

use async_trait::async_trait;
use hagwon_application::{AuditEvent, AuditRepository};
use hagwon_core::AppResult;
use tracing::info;

/// Audit repository used when no database is configured.
#[derive(Clone, Default)]
pub struct TracingAuditRepository;

impl TracingAuditRepository {
    /// Creates a new tracing audit repository.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditRepository for TracingAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        info!(
            tenant_id = %event.tenant_id,
            actor = event.actor_subject.as_str(),
            action = event.action.as_str(),
            target = event.target.kind(),
            target_subject = event.target.subject().unwrap_or_default(),
            roles = event.affected_role_names().join(","),
            detail = event.detail.as_deref().unwrap_or_default(),
            "audit event"
        );

        Ok(())
    }
}
