use std::collections::BTreeMap;
use std::sync::Arc;

use hagwon_core::{AppError, AppResult, TenantId};
use hagwon_domain::{
    ClassSlotAssignment, EnrollmentAssignment, ImportableRecord, IndexedRoster, MatchResult,
    PersonIdentity, RosterLookup, SlotKey, UserProfile, match_all, resolve_substitute,
    staff_ids_match,
};
use tracing::{debug, info};

use crate::roster_ports::{ClassAssignmentRepository, RosterRepository};

/// Application service answering "is this me?" questions against academy
/// rosters and linking imported records to students.
#[derive(Clone)]
pub struct MatchingService {
    roster_repository: Arc<dyn RosterRepository>,
    class_repository: Arc<dyn ClassAssignmentRepository>,
}

impl MatchingService {
    /// Creates a new matching service.
    #[must_use]
    pub fn new(
        roster_repository: Arc<dyn RosterRepository>,
        class_repository: Arc<dyn ClassAssignmentRepository>,
    ) -> Self {
        Self {
            roster_repository,
            class_repository,
        }
    }

    /// Returns whether `candidate` names `identity`, pivoting through the
    /// staff roster.
    pub async fn teacher_matches(
        &self,
        tenant_id: TenantId,
        candidate: &str,
        identity: &PersonIdentity,
    ) -> AppResult<bool> {
        let staff = self.roster_repository.list_staff(tenant_id).await?;
        Ok(identity.matches(candidate, Some(staff.as_slice())))
    }

    /// Returns whether the override for `slot_key` in `class_id` names
    /// `identity`.
    pub async fn slot_owned_by(
        &self,
        tenant_id: TenantId,
        class_id: &str,
        slot_key: &SlotKey,
        identity: &PersonIdentity,
    ) -> AppResult<bool> {
        let class = self.require_class(tenant_id, class_id).await?;
        let staff = self.roster_repository.list_staff(tenant_id).await?;

        Ok(class.is_slot_owned_by(slot_key.as_str(), identity, Some(staff.as_slice())))
    }

    /// Returns the ids of classes `identity` teaches, either as primary
    /// owner or through any slot override, sorted.
    pub async fn classes_taught_by(
        &self,
        tenant_id: TenantId,
        identity: &PersonIdentity,
    ) -> AppResult<Vec<String>> {
        let classes = self.class_repository.list_classes(tenant_id).await?;
        let staff = IndexedRoster::new(self.roster_repository.list_staff(tenant_id).await?);

        let mut class_ids = classes
            .iter()
            .filter(|class| {
                class.is_primary_owner(identity, Some(&staff))
                    || class.is_any_slot_owned_by(identity, Some(&staff))
            })
            .map(|class| class.class_id().to_owned())
            .collect::<Vec<_>>();
        class_ids.sort_unstable();

        debug!(
            tenant_id = %tenant_id,
            teacher = identity.name(),
            classes = class_ids.len(),
            "resolved classes taught"
        );

        Ok(class_ids)
    }

    /// Returns the ids of classes the signed-in account teaches, sorted.
    ///
    /// Matches by the profile's display and alternate names like
    /// [`Self::classes_taught_by`]. A profile linked to a staff roster entry
    /// also owns every class whose primary owner name resolves to that entry.
    pub async fn classes_taught_by_profile(
        &self,
        tenant_id: TenantId,
        profile: &UserProfile,
    ) -> AppResult<Vec<String>> {
        let identity = profile.person_identity();
        let classes = self.class_repository.list_classes(tenant_id).await?;
        let staff = IndexedRoster::new(self.roster_repository.list_staff(tenant_id).await?);

        let mut class_ids = classes
            .iter()
            .filter(|class| {
                let linked = staff
                    .find_by_name(class.primary_owner_name())
                    .is_some_and(|entry| staff_ids_match(Some(entry.id()), profile.staff_id()));

                linked
                    || class.is_primary_owner(&identity, Some(&staff))
                    || class.is_any_slot_owned_by(&identity, Some(&staff))
            })
            .map(|class| class.class_id().to_owned())
            .collect::<Vec<_>>();
        class_ids.sort_unstable();

        debug!(
            tenant_id = %tenant_id,
            subject = profile.subject(),
            staff_id = profile.staff_id().unwrap_or_default(),
            classes = class_ids.len(),
            "resolved classes taught by profile"
        );

        Ok(class_ids)
    }

    /// Returns whether `identity` teaches `class_id` as a substitute.
    ///
    /// A recorded enrollment flag wins; otherwise the class overrides decide.
    /// An unknown class is not an error and yields `false` unless the
    /// enrollment says otherwise.
    pub async fn resolve_substitute(
        &self,
        tenant_id: TenantId,
        class_id: &str,
        enrollment: Option<EnrollmentAssignment>,
        identity: &PersonIdentity,
    ) -> AppResult<bool> {
        if let Some(flag) = enrollment.and_then(|value| value.substitute_flag()) {
            return Ok(flag);
        }

        let class = self.class_repository.find_class(tenant_id, class_id).await?;
        let staff = self.roster_repository.list_staff(tenant_id).await?;

        Ok(resolve_substitute(
            class.as_ref(),
            enrollment.as_ref(),
            identity,
            Some(staff.as_slice()),
        ))
    }

    /// Links imported records to students; unmatched records are omitted.
    pub async fn match_import_records(
        &self,
        tenant_id: TenantId,
        records: &[ImportableRecord],
    ) -> AppResult<BTreeMap<String, MatchResult>> {
        let students = self.roster_repository.list_students(tenant_id).await?;
        let matches = match_all(records, students.as_slice());

        info!(
            tenant_id = %tenant_id,
            records = records.len(),
            matched = matches.len(),
            unmatched = records.len().saturating_sub(matches.len()),
            "matched imported records against student roster"
        );

        Ok(matches)
    }

    async fn require_class(
        &self,
        tenant_id: TenantId,
        class_id: &str,
    ) -> AppResult<ClassSlotAssignment> {
        self.class_repository
            .find_class(tenant_id, class_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "class '{class_id}' does not exist in tenant '{tenant_id}'"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use hagwon_core::{AppError, AppResult, TenantId};
    use hagwon_domain::{
        AccountStatus, ClassSlotAssignment, EnrollmentAssignment, ImportableRecord, MatchTier,
        PersonIdentity, RosterEntry, SlotKey, UserProfile, UserRole,
    };

    use crate::roster_ports::{ClassAssignmentRepository, RosterRepository};

    use super::MatchingService;

    struct FakeRosterRepository {
        staff: Vec<RosterEntry>,
        students: Vec<RosterEntry>,
    }

    #[async_trait]
    impl RosterRepository for FakeRosterRepository {
        async fn list_staff(&self, _tenant_id: TenantId) -> AppResult<Vec<RosterEntry>> {
            Ok(self.staff.clone())
        }

        async fn list_students(&self, _tenant_id: TenantId) -> AppResult<Vec<RosterEntry>> {
            Ok(self.students.clone())
        }
    }

    struct FakeClassAssignmentRepository {
        classes: Vec<ClassSlotAssignment>,
    }

    #[async_trait]
    impl ClassAssignmentRepository for FakeClassAssignmentRepository {
        async fn find_class(
            &self,
            _tenant_id: TenantId,
            class_id: &str,
        ) -> AppResult<Option<ClassSlotAssignment>> {
            Ok(self
                .classes
                .iter()
                .find(|class| class.class_id() == class_id)
                .cloned())
        }

        async fn list_classes(&self, _tenant_id: TenantId) -> AppResult<Vec<ClassSlotAssignment>> {
            Ok(self.classes.clone())
        }
    }

    fn slot(value: &str) -> SlotKey {
        value.parse().unwrap_or_else(|_| unreachable!())
    }

    fn entry(id: &str, name: &str) -> RosterEntry {
        RosterEntry::new(id, name).unwrap_or_else(|_| unreachable!())
    }

    fn class(class_id: &str, primary_owner_name: &str) -> ClassSlotAssignment {
        ClassSlotAssignment::new(class_id, primary_owner_name).unwrap_or_else(|_| unreachable!())
    }

    fn record(
        record_id: &str,
        external_id: Option<&str>,
        qualifier: Option<&str>,
    ) -> ImportableRecord {
        ImportableRecord::new(
            record_id,
            Some("김철수".to_owned()),
            external_id.map(str::to_owned),
            qualifier.map(str::to_owned),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn profile(display_name: &str, staff_id: Option<&str>) -> UserProfile {
        UserProfile::new(
            "teacher",
            UserRole::MathTeacher,
            AccountStatus::Approved,
            display_name,
        )
        .unwrap_or_else(|_| unreachable!())
        .with_staff_id(staff_id.map(str::to_owned))
    }

    fn service() -> MatchingService {
        let staff = vec![
            entry("t1", "김선생").with_alternate_name(Some("Kim".to_owned())),
            entry("t2", "이선생").with_alternate_name(Some("Lee".to_owned())),
            entry("t3", "박선생"),
        ];
        let students = vec![
            entry("st1", "김철수")
                .with_external_id(Some("1234".to_owned()))
                .with_qualifier(Some("서울초등학교".to_owned())),
            entry("st2", "김철수").with_qualifier(Some("부산중학교".to_owned())),
        ];
        let classes = vec![
            class("eng-b", "Kim").with_slot_override(slot("화-2"), "이선생"),
            class("eng-a", "이선생"),
            class("math-a", "박선생"),
        ];

        MatchingService::new(
            Arc::new(FakeRosterRepository { staff, students }),
            Arc::new(FakeClassAssignmentRepository { classes }),
        )
    }

    fn lee() -> PersonIdentity {
        PersonIdentity::new("Lee", None)
    }

    #[tokio::test]
    async fn teacher_matches_through_staff_roster() {
        let service = service();
        let tenant_id = TenantId::new();

        assert!(matches!(
            service.teacher_matches(tenant_id, "이선생", &lee()).await,
            Ok(true)
        ));
        assert!(matches!(
            service.teacher_matches(tenant_id, "김선생", &lee()).await,
            Ok(false)
        ));
    }

    #[tokio::test]
    async fn slot_owner_resolves_override() {
        let service = service();
        let tenant_id = TenantId::new();

        let owned = service
            .slot_owned_by(tenant_id, "eng-b", &slot("화-2"), &lee())
            .await;
        let other_slot = service
            .slot_owned_by(tenant_id, "eng-b", &slot("월-1"), &lee())
            .await;

        assert!(matches!(owned, Ok(true)));
        assert!(matches!(other_slot, Ok(false)));
    }

    #[tokio::test]
    async fn slot_owner_of_unknown_class_is_not_found() {
        let result = service()
            .slot_owned_by(TenantId::new(), "missing", &slot("월-1"), &lee())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn classes_include_primary_and_override_ownership() {
        let classes = service().classes_taught_by(TenantId::new(), &lee()).await;

        assert!(matches!(classes, Ok(ref ids) if ids == &["eng-a", "eng-b"]));
    }

    #[tokio::test]
    async fn profile_classes_follow_linked_staff_entry() {
        let service = service();
        let tenant_id = TenantId::new();

        let linked = service
            .classes_taught_by_profile(tenant_id, &profile("Mr. Park", Some("t3")))
            .await;
        let unlinked = service
            .classes_taught_by_profile(tenant_id, &profile("Mr. Park", None))
            .await;

        assert!(matches!(linked, Ok(ref ids) if ids == &["math-a"]));
        assert!(matches!(unlinked, Ok(ref ids) if ids.is_empty()));
    }

    #[tokio::test]
    async fn profile_classes_match_display_name() {
        let classes = service()
            .classes_taught_by_profile(TenantId::new(), &profile("Lee", Some("t9")))
            .await;

        assert!(matches!(classes, Ok(ref ids) if ids == &["eng-a", "eng-b"]));
    }

    #[tokio::test]
    async fn substitute_comes_from_overrides_or_enrollment_flag() {
        let service = service();
        let tenant_id = TenantId::new();
        let kim = PersonIdentity::new("Kim", None);

        let lee_is_substitute = service
            .resolve_substitute(tenant_id, "eng-b", None, &lee())
            .await;
        let kim_is_substitute = service
            .resolve_substitute(tenant_id, "eng-b", None, &kim)
            .await;
        let flagged = service
            .resolve_substitute(
                tenant_id,
                "math-a",
                Some(EnrollmentAssignment::new(Some(true))),
                &kim,
            )
            .await;
        let unknown = service
            .resolve_substitute(tenant_id, "missing", None, &kim)
            .await;

        assert!(matches!(lee_is_substitute, Ok(true)));
        assert!(matches!(kim_is_substitute, Ok(false)));
        assert!(matches!(flagged, Ok(true)));
        assert!(matches!(unknown, Ok(false)));
    }

    #[tokio::test]
    async fn import_records_match_student_roster() {
        let records = vec![
            record("r1", Some("1234"), None),
            record("r2", None, Some("부산중")),
            record("r3", None, None),
        ];

        let result = service()
            .match_import_records(TenantId::new(), &records)
            .await;
        assert!(result.is_ok());
        let matches = result.unwrap_or_default();

        assert_eq!(matches.len(), 2);
        assert_eq!(
            matches.get("r1").map(|result| result.match_tier),
            Some(MatchTier::ExternalId)
        );
        assert_eq!(
            matches.get("r2").map(|result| result.entity_id.as_str()),
            Some("st2")
        );
        assert!(!matches.contains_key("r3"));
    }
}
