use std::sync::Arc;

use axum::Json;
use hagwon_application::{AccessService, MatchingService};
use hagwon_core::{TenantId, UserIdentity};
use hagwon_infrastructure::{
    InMemoryAccessRepository, InMemoryRosterRepository, TracingAuditRepository, parse_snapshots,
    seed_repositories,
};

use crate::error::ApiResult;
use crate::state::AppState;

pub(crate) struct TestAcademy {
    pub(crate) state: AppState,
    pub(crate) tenant_id: TenantId,
}

impl TestAcademy {
    pub(crate) async fn seeded() -> Self {
        let tenant_id = TenantId::new();
        let document = format!(
            r#"[{{
                "tenant_id": "{tenant_id}",
                "staff": [
                    {{ "id": "t1", "primary_name": "김선생", "alternate_name": "Kim" }},
                    {{ "id": "t2", "primary_name": "이선생", "alternate_name": "Lee" }},
                    {{ "id": "t3", "primary_name": "박선생" }}
                ],
                "students": [
                    {{ "id": "st1", "primary_name": "김철수", "external_id": "1234",
                       "qualifier": "서울초등학교" }},
                    {{ "id": "st2", "primary_name": "김철수", "qualifier": "부산중학교" }}
                ],
                "classes": [
                    {{ "class_id": "eng-b", "primary_owner_name": "Kim",
                       "slot_overrides": {{ "화-2": "이선생" }} }},
                    {{ "class_id": "eng-a", "primary_owner_name": "이선생" }},
                    {{ "class_id": "math-a", "primary_owner_name": "박선생" }}
                ],
                "profiles": [
                    {{ "subject": "owner", "role": "master", "status": "approved",
                       "display_name": "원장" }},
                    {{ "subject": "office", "role": "admin", "status": "approved",
                       "display_name": "실장" }},
                    {{ "subject": "kim", "role": "math_teacher", "status": "approved",
                       "display_name": "Kim", "alternate_name": "김선생" }},
                    {{ "subject": "park", "role": "math_teacher", "status": "approved",
                       "display_name": "Mr. Park", "staff_id": "t3" }},
                    {{ "subject": "newcomer", "role": "user", "status": "pending",
                       "display_name": "Park" }}
                ]
            }}]"#
        );

        let rosters = Arc::new(InMemoryRosterRepository::new());
        let access = Arc::new(InMemoryAccessRepository::new());
        let snapshots = parse_snapshots(document.as_str());
        assert!(snapshots.is_ok());
        let seeded = seed_repositories(
            snapshots.unwrap_or_default(),
            &rosters,
            &access,
            access.as_ref(),
        )
        .await;
        assert!(seeded.is_ok());

        let state = AppState {
            access_service: AccessService::new(
                access.clone(),
                access,
                Arc::new(TracingAuditRepository::new()),
            ),
            matching_service: MatchingService::new(rosters.clone(), rosters),
            frontend_url: "http://localhost:3000".to_owned(),
        };

        Self { state, tenant_id }
    }

    pub(crate) fn caller(&self, subject: &str) -> UserIdentity {
        UserIdentity::new(subject, subject, self.tenant_id)
    }
}

/// Unwraps a handler's JSON body, if it succeeded.
pub(crate) fn body<T>(result: ApiResult<Json<T>>) -> Option<T> {
    result.ok().map(|Json(value)| value)
}
