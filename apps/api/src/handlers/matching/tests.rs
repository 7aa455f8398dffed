use axum::Json;
use axum::extract::{Extension, Query, State};
use hagwon_core::AppError;

use super::{
    classes_taught_handler, import_records_handler, my_classes_handler, slot_owner_handler,
    teacher_match_handler,
};
use crate::dto::{ClassesTaughtQuery, ImportRecordsRequest, SlotOwnerRequest, TeacherMatchRequest};
use crate::handlers::test_support::{TestAcademy, body};

fn slot_request(class_id: &str, slot_key: &str, name: &str) -> SlotOwnerRequest {
    SlotOwnerRequest {
        class_id: class_id.to_owned(),
        slot_key: slot_key.to_owned(),
        name: name.to_owned(),
        alternate_name: None,
        substitute_flag: None,
    }
}

#[tokio::test]
async fn teacher_match_pivots_through_staff_roster() {
    let academy = TestAcademy::seeded().await;

    let response = teacher_match_handler(
        State(academy.state.clone()),
        Extension(academy.caller("kim")),
        Json(TeacherMatchRequest {
            candidate: "이선생".to_owned(),
            name: "Lee".to_owned(),
            alternate_name: None,
        }),
    )
    .await;

    assert!(body(response).is_some_and(|response| response.matches));
}

#[tokio::test]
async fn classes_taught_include_slot_overrides() {
    let academy = TestAcademy::seeded().await;

    let response = classes_taught_handler(
        State(academy.state.clone()),
        Extension(academy.caller("kim")),
        Query(ClassesTaughtQuery {
            name: "Lee".to_owned(),
            alternate_name: None,
        }),
    )
    .await;

    assert_eq!(
        body(response).map(|response| response.class_ids),
        Some(vec!["eng-a".to_owned(), "eng-b".to_owned()])
    );
}

#[tokio::test]
async fn my_classes_use_caller_profile() {
    let academy = TestAcademy::seeded().await;

    let kim = my_classes_handler(
        State(academy.state.clone()),
        Extension(academy.caller("kim")),
    )
    .await;
    let park = my_classes_handler(
        State(academy.state.clone()),
        Extension(academy.caller("park")),
    )
    .await;

    assert_eq!(
        body(kim).map(|response| response.class_ids),
        Some(vec!["eng-b".to_owned()])
    );
    assert_eq!(
        body(park).map(|response| response.class_ids),
        Some(vec!["math-a".to_owned()])
    );
}

#[tokio::test]
async fn my_classes_require_approved_profile() {
    let academy = TestAcademy::seeded().await;

    let result = my_classes_handler(
        State(academy.state.clone()),
        Extension(academy.caller("newcomer")),
    )
    .await;

    assert!(matches!(result, Err(error) if matches!(error.0, AppError::Forbidden(_))));
}

#[tokio::test]
async fn override_owner_is_reported_as_substitute() {
    let academy = TestAcademy::seeded().await;

    let lee = slot_owner_handler(
        State(academy.state.clone()),
        Extension(academy.caller("kim")),
        Json(slot_request("eng-b", "화-2", "Lee")),
    )
    .await;
    let kim = slot_owner_handler(
        State(academy.state.clone()),
        Extension(academy.caller("kim")),
        Json(slot_request("eng-b", "화-2", "Kim")),
    )
    .await;

    assert!(body(lee).is_some_and(|lee| lee.owned && lee.substitute));
    assert!(body(kim).is_some_and(|kim| !kim.owned && !kim.substitute));
}

#[tokio::test]
async fn slot_owner_rejects_bad_slot_key_and_unknown_class() {
    let academy = TestAcademy::seeded().await;

    let bad_key = slot_owner_handler(
        State(academy.state.clone()),
        Extension(academy.caller("kim")),
        Json(slot_request("eng-b", "tuesday", "Lee")),
    )
    .await;
    let unknown_class = slot_owner_handler(
        State(academy.state.clone()),
        Extension(academy.caller("kim")),
        Json(slot_request("math-z", "화-2", "Lee")),
    )
    .await;

    assert!(matches!(bad_key, Err(error) if matches!(error.0, AppError::Validation(_))));
    assert!(matches!(unknown_class, Err(error) if matches!(error.0, AppError::NotFound(_))));
}

#[tokio::test]
async fn import_records_link_students_by_tier() {
    let academy = TestAcademy::seeded().await;
    let payload = serde_json::from_str::<ImportRecordsRequest>(
        r#"{"records":[
            {"record_id":"r1","subject_name":"김철수","external_id":"1234"},
            {"record_id":"r2","subject_name":"김철수","qualifier":"부산중"},
            {"record_id":"r3","subject_name":"김철수"}
        ]}"#,
    )
    .unwrap_or_else(|_| unreachable!());

    let response = import_records_handler(
        State(academy.state.clone()),
        Extension(academy.caller("office")),
        Json(payload),
    )
    .await;
    let matches = body(response)
        .map(|response| response.matches)
        .unwrap_or_default();

    assert_eq!(
        matches.get("r1").map(|result| result.match_tier.as_str()),
        Some("external-id")
    );
    assert_eq!(
        matches.get("r2").map(|result| result.entity_id.as_str()),
        Some("st2")
    );
    assert!(!matches.contains_key("r3"));
}

#[tokio::test]
async fn import_records_require_student_edit_permission() {
    let academy = TestAcademy::seeded().await;

    let result = import_records_handler(
        State(academy.state.clone()),
        Extension(academy.caller("newcomer")),
        Json(ImportRecordsRequest {
            records: Vec::new(),
        }),
    )
    .await;

    assert!(matches!(result, Err(error) if matches!(error.0, AppError::Forbidden(_))));
}
