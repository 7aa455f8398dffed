use std::collections::HashMap;

use async_trait::async_trait;
use hagwon_application::{ClassAssignmentRepository, RosterRepository};
use hagwon_core::{AppResult, TenantId};
use hagwon_domain::{ClassSlotAssignment, RosterEntry};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
struct TenantRoster {
    staff: Vec<RosterEntry>,
    students: Vec<RosterEntry>,
    classes: Vec<ClassSlotAssignment>,
}

/// In-memory roster and class assignment repository.
///
/// Unknown tenants read as empty rosters.
#[derive(Debug, Default)]
pub struct InMemoryRosterRepository {
    tenants: RwLock<HashMap<TenantId, TenantRoster>>,
}

impl InMemoryRosterRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tenants: RwLock::new(HashMap::new()),
        }
    }

    /// Replaces the roster snapshot of one tenant.
    pub async fn replace_tenant(
        &self,
        tenant_id: TenantId,
        staff: Vec<RosterEntry>,
        students: Vec<RosterEntry>,
        classes: Vec<ClassSlotAssignment>,
    ) {
        self.tenants.write().await.insert(
            tenant_id,
            TenantRoster {
                staff,
                students,
                classes,
            },
        );
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn list_staff(&self, tenant_id: TenantId) -> AppResult<Vec<RosterEntry>> {
        Ok(self
            .tenants
            .read()
            .await
            .get(&tenant_id)
            .map(|roster| roster.staff.clone())
            .unwrap_or_default())
    }

    async fn list_students(&self, tenant_id: TenantId) -> AppResult<Vec<RosterEntry>> {
        Ok(self
            .tenants
            .read()
            .await
            .get(&tenant_id)
            .map(|roster| roster.students.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl ClassAssignmentRepository for InMemoryRosterRepository {
    async fn find_class(
        &self,
        tenant_id: TenantId,
        class_id: &str,
    ) -> AppResult<Option<ClassSlotAssignment>> {
        Ok(self.tenants.read().await.get(&tenant_id).and_then(|roster| {
            roster
                .classes
                .iter()
                .find(|class| class.class_id() == class_id)
                .cloned()
        }))
    }

    async fn list_classes(&self, tenant_id: TenantId) -> AppResult<Vec<ClassSlotAssignment>> {
        Ok(self
            .tenants
            .read()
            .await
            .get(&tenant_id)
            .map(|roster| roster.classes.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use hagwon_application::{ClassAssignmentRepository, RosterRepository};
    use hagwon_core::TenantId;
    use hagwon_domain::{ClassSlotAssignment, RosterEntry};

    use super::InMemoryRosterRepository;

    #[tokio::test]
    async fn rosters_are_isolated_per_tenant() {
        let repository = InMemoryRosterRepository::new();
        let tenant_id = TenantId::new();
        let other_tenant_id = TenantId::new();
        repository
            .replace_tenant(
                tenant_id,
                vec![RosterEntry::new("t1", "김선생").unwrap_or_else(|_| unreachable!())],
                Vec::new(),
                vec![ClassSlotAssignment::new("eng-a", "김선생").unwrap_or_else(|_| unreachable!())],
            )
            .await;

        let staff = repository.list_staff(tenant_id).await;
        let other_staff = repository.list_staff(other_tenant_id).await;
        let class = repository.find_class(tenant_id, "eng-a").await;
        let missing = repository.find_class(other_tenant_id, "eng-a").await;

        assert!(matches!(staff, Ok(ref entries) if entries.len() == 1));
        assert!(matches!(other_staff, Ok(ref entries) if entries.is_empty()));
        assert!(matches!(class, Ok(Some(_))));
        assert!(matches!(missing, Ok(None)));
    }

    #[tokio::test]
    async fn replacing_a_tenant_preserves_roster_order() {
        let repository = InMemoryRosterRepository::new();
        let tenant_id = TenantId::new();
        let students = vec![
            RosterEntry::new("st2", "이영희").unwrap_or_else(|_| unreachable!()),
            RosterEntry::new("st1", "김철수").unwrap_or_else(|_| unreachable!()),
        ];
        repository
            .replace_tenant(tenant_id, Vec::new(), students, Vec::new())
            .await;

        let ids = repository
            .list_students(tenant_id)
            .await
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.id().to_owned())
            .collect::<Vec<_>>();

        assert_eq!(ids, vec!["st2".to_owned(), "st1".to_owned()]);
    }
}
