use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;

use hagwon_core::UserIdentity;

use crate::dto::{
    AccessibleTabsResponse, AssignableRolesResponse, ChangeUserRoleRequest,
    EffectivePermissionsResponse, SimulatedRoleQuery, TabGroupResponse,
    UpdatePermissionPatchesRequest, UpdateTabOverridesRequest, UserProfileResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod administration;
mod capabilities;


pub use administration::{
    assignable_roles_handler, change_user_role_handler, update_permission_patches_handler,
    update_tab_overrides_handler,
};
pub use capabilities::{list_permissions_handler, list_tab_groups_handler, list_tabs_handler};
