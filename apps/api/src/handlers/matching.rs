use axum::Json;
use axum::extract::{Extension, Query, State};

use hagwon_core::{AppResult, UserIdentity};
use hagwon_domain::{ImportableRecord, Permission};

use crate::dto::{
    ClassesTaughtQuery, ClassesTaughtResponse, ImportRecordsRequest, ImportRecordsResponse,
    MatchResultResponse, SlotOwnerRequest, SlotOwnerResponse, TeacherMatchRequest,
    TeacherMatchResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[cfg(test)]
mod tests;

pub async fn teacher_match_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<TeacherMatchRequest>,
) -> ApiResult<Json<TeacherMatchResponse>> {
    let matches = state
        .matching_service
        .teacher_matches(
            user.tenant_id(),
            payload.candidate.as_str(),
            &payload.identity(),
        )
        .await?;

    Ok(Json(TeacherMatchResponse { matches }))
}

pub async fn classes_taught_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<ClassesTaughtQuery>,
) -> ApiResult<Json<ClassesTaughtResponse>> {
    let class_ids = state
        .matching_service
        .classes_taught_by(user.tenant_id(), &query.identity())
        .await?;

    Ok(Json(ClassesTaughtResponse { class_ids }))
}

pub async fn my_classes_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<ClassesTaughtResponse>> {
    let profile = state.access_service.current_profile(&user).await?;
    let class_ids = state
        .matching_service
        .classes_taught_by_profile(user.tenant_id(), &profile)
        .await?;

    Ok(Json(ClassesTaughtResponse { class_ids }))
}

pub async fn slot_owner_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<SlotOwnerRequest>,
) -> ApiResult<Json<SlotOwnerResponse>> {
    let identity = payload.identity();
    let slot_key = payload.slot_key()?;

    let owned = state
        .matching_service
        .slot_owned_by(
            user.tenant_id(),
            payload.class_id.as_str(),
            &slot_key,
            &identity,
        )
        .await?;
    let substitute = state
        .matching_service
        .resolve_substitute(
            user.tenant_id(),
            payload.class_id.as_str(),
            payload.enrollment(),
            &identity,
        )
        .await?;

    Ok(Json(SlotOwnerResponse { owned, substitute }))
}

pub async fn import_records_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<ImportRecordsRequest>,
) -> ApiResult<Json<ImportRecordsResponse>> {
    state
        .access_service
        .require_permission(&user, Permission::StudentsEdit)
        .await?;

    let records = payload
        .records
        .into_iter()
        .map(ImportableRecord::try_from)
        .collect::<AppResult<Vec<_>>>()?;

    let matches = state
        .matching_service
        .match_import_records(user.tenant_id(), records.as_slice())
        .await?
        .into_iter()
        .map(|(record_id, result)| (record_id, MatchResultResponse::from(result)))
        .collect();

    Ok(Json(ImportRecordsResponse { matches }))
}
