mod conversions;
mod types;

pub use types::{
    AccessibleTabsResponse, AssignableRolesResponse, ChangeUserRoleRequest,
    EffectivePermissionsResponse, SimulatedRoleQuery, TabGroupResponse,
    UpdatePermissionPatchesRequest, UpdateTabOverridesRequest, UserProfileResponse,
};
