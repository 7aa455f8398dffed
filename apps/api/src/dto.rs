mod access;
mod common;
mod matching;

pub use access::{
    AccessibleTabsResponse, AssignableRolesResponse, ChangeUserRoleRequest,
    EffectivePermissionsResponse, SimulatedRoleQuery, TabGroupResponse,
    UpdatePermissionPatchesRequest, UpdateTabOverridesRequest, UserProfileResponse,
};
pub use common::HealthResponse;
pub use matching::{
    ClassesTaughtQuery, ClassesTaughtResponse, ImportRecordsRequest, ImportRecordsResponse,
    MatchResultResponse, SlotOwnerRequest, SlotOwnerResponse, TeacherMatchRequest,
    TeacherMatchResponse,
};
