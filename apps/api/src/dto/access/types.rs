use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tabs the caller may open, in navigation order.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/accessible-tabs-response.ts"
)]
pub struct AccessibleTabsResponse {
    pub tabs: Vec<String>,
}

/// One navigation group narrowed to the caller's tabs.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/tab-group-response.ts"
)]
pub struct TabGroupResponse {
    pub id: String,
    pub label: String,
    pub order: u8,
    pub tabs: Vec<String>,
}

/// Effective granular permissions of the caller.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-permissions-response.ts"
)]
pub struct EffectivePermissionsResponse {
    pub permissions: Vec<String>,
}

/// Optional role preview for capability listings.
///
/// Honored only for the super role; other callers get their own capabilities.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/simulated-role-query.ts"
)]
pub struct SimulatedRoleQuery {
    pub simulated_role: Option<String>,
}

/// Incoming tab override table keyed by role.
///
/// An empty list keeps the role on its default tabs.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-tab-overrides-request.ts"
)]
pub struct UpdateTabOverridesRequest {
    pub overrides: BTreeMap<String, Vec<String>>,
}

/// Incoming permission patches keyed by role, then permission.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-permission-patches-request.ts"
)]
pub struct UpdatePermissionPatchesRequest {
    pub patches: BTreeMap<String, BTreeMap<String, bool>>,
}

/// Roles the caller may hand out, highest first.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignable-roles-response.ts"
)]
pub struct AssignableRolesResponse {
    pub roles: Vec<String>,
}

/// Incoming payload for role changes.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/change-user-role-request.ts"
)]
pub struct ChangeUserRoleRequest {
    pub role: String,
}

/// API representation of a staff account.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-profile-response.ts"
)]
pub struct UserProfileResponse {
    pub subject: String,
    pub display_name: String,
    pub role: String,
    pub status: String,
    pub alternate_name: Option<String>,
    pub staff_id: Option<String>,
}
