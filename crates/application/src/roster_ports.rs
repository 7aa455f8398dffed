use async_trait::async_trait;
use hagwon_core::{AppResult, TenantId};
use hagwon_domain::{ClassSlotAssignment, RosterEntry};

/// Repository port for academy rosters.
///
/// Both listings return the roster in stored order; name lookups take the
/// first entry in that order.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Lists staff members.
    async fn list_staff(&self, tenant_id: TenantId) -> AppResult<Vec<RosterEntry>>;

    /// Lists enrolled students.
    async fn list_students(&self, tenant_id: TenantId) -> AppResult<Vec<RosterEntry>>;
}

/// Repository port for class teacher assignments.
#[async_trait]
pub trait ClassAssignmentRepository: Send + Sync {
    /// Finds one class assignment.
    async fn find_class(
        &self,
        tenant_id: TenantId,
        class_id: &str,
    ) -> AppResult<Option<ClassSlotAssignment>>;

    /// Lists all class assignments.
    async fn list_classes(&self, tenant_id: TenantId) -> AppResult<Vec<ClassSlotAssignment>>;
}
