use super::*;

pub async fn update_tab_overrides_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<UpdateTabOverridesRequest>,
) -> ApiResult<StatusCode> {
    state
        .access_service
        .update_tab_overrides(&user, payload.into_table()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_permission_patches_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<UpdatePermissionPatchesRequest>,
) -> ApiResult<StatusCode> {
    state
        .access_service
        .update_permission_patches(&user, payload.into_patches()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn assignable_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<AssignableRolesResponse>> {
    let roles = state.access_service.assignable_roles(&user).await?;

    Ok(Json(AssignableRolesResponse {
        roles: roles
            .into_iter()
            .map(|role| role.as_str().to_owned())
            .collect(),
    }))
}

pub async fn change_user_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(subject): Path<String>,
    Json(payload): Json<ChangeUserRoleRequest>,
) -> ApiResult<Json<UserProfileResponse>> {
    let profile = state
        .access_service
        .change_user_role(&user, subject.as_str(), payload.role()?)
        .await?;

    Ok(Json(UserProfileResponse::from(profile)))
}
