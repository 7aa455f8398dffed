use super::*;

pub async fn list_tabs_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<SimulatedRoleQuery>,
) -> ApiResult<Json<AccessibleTabsResponse>> {
    let tabs = state
        .access_service
        .accessible_tabs(&user, query.role()?)
        .await?;

    Ok(Json(AccessibleTabsResponse {
        tabs: tabs.into_iter().map(|tab| tab.as_str().to_owned()).collect(),
    }))
}

pub async fn list_tab_groups_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<SimulatedRoleQuery>,
) -> ApiResult<Json<Vec<TabGroupResponse>>> {
    let groups = state
        .access_service
        .accessible_tab_groups(&user, query.role()?)
        .await?
        .into_iter()
        .map(TabGroupResponse::from)
        .collect();

    Ok(Json(groups))
}

pub async fn list_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<SimulatedRoleQuery>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let permissions = state
        .access_service
        .effective_permissions(&user, query.role()?)
        .await?;

    Ok(Json(EffectivePermissionsResponse {
        permissions: permissions
            .into_iter()
            .map(|permission| permission.as_str().to_owned())
            .collect(),
    }))
}
