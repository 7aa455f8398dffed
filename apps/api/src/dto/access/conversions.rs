use std::str::FromStr;

use hagwon_application::AccessibleTabGroup;
use hagwon_core::AppResult;
use hagwon_domain::{
    AppTab, Permission, RoleAccessTable, RolePermissionPatches, UserProfile, UserRole,
};

use super::types::{
    ChangeUserRoleRequest, SimulatedRoleQuery, TabGroupResponse, UpdatePermissionPatchesRequest,
    UpdateTabOverridesRequest, UserProfileResponse,
};

impl UpdateTabOverridesRequest {
    /// Parses the transport table into a typed override table.
    pub fn into_table(self) -> AppResult<RoleAccessTable<AppTab>> {
        let mut table = RoleAccessTable::new();
        for (role, tabs) in self.overrides {
            let tabs = tabs
                .iter()
                .map(|tab| AppTab::from_str(tab))
                .collect::<AppResult<Vec<_>>>()?;
            table.insert(UserRole::from_str(&role)?, tabs);
        }

        Ok(table)
    }
}

impl UpdatePermissionPatchesRequest {
    /// Parses the transport patches into a typed patch table.
    pub fn into_patches(self) -> AppResult<RolePermissionPatches> {
        let mut patches = RolePermissionPatches::new();
        for (role, entries) in self.patches {
            let role = UserRole::from_str(&role)?;
            for (permission, granted) in entries {
                patches =
                    patches.with_patch(role, Permission::from_transport(&permission)?, granted);
            }
        }

        Ok(patches)
    }
}

impl ChangeUserRoleRequest {
    /// Parses the requested role.
    pub fn role(&self) -> AppResult<UserRole> {
        UserRole::from_str(&self.role)
    }
}

impl SimulatedRoleQuery {
    /// Parses the previewed role; a blank value means no preview.
    pub fn role(&self) -> AppResult<Option<UserRole>> {
        self.simulated_role
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(UserRole::from_str)
            .transpose()
    }
}

impl From<AccessibleTabGroup> for TabGroupResponse {
    fn from(value: AccessibleTabGroup) -> Self {
        Self {
            id: value.group.id().to_owned(),
            label: value.group.label().to_owned(),
            order: value.group.order(),
            tabs: value
                .tabs
                .into_iter()
                .map(|tab| tab.as_str().to_owned())
                .collect(),
        }
    }
}

impl From<UserProfile> for UserProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            subject: value.subject().to_owned(),
            display_name: value.display_name().to_owned(),
            role: value.role().as_str().to_owned(),
            status: value.status().as_str().to_owned(),
            alternate_name: value.alternate_name().map(ToOwned::to_owned),
            staff_id: value.staff_id().map(ToOwned::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use hagwon_core::AppError;
    use hagwon_domain::{AppTab, Permission, UserRole};

    use super::super::types::{
        SimulatedRoleQuery, UpdatePermissionPatchesRequest, UpdateTabOverridesRequest,
    };

    #[test]
    fn tab_overrides_parse_roles_and_tabs() {
        let request = serde_json::from_str::<UpdateTabOverridesRequest>(
            r#"{"overrides":{"user":["dashboard","gantt"],"manager":[]}}"#,
        )
        .unwrap_or_else(|_| unreachable!());

        let table = request.into_table();
        assert!(table.is_ok());
        let table = table.unwrap_or_default();

        assert_eq!(table.get(UserRole::User).map(|tabs| tabs.len()), Some(2));
        assert!(
            table
                .get(UserRole::User)
                .is_some_and(|tabs| tabs.contains(&AppTab::Gantt))
        );
        assert!(
            table
                .get(UserRole::Manager)
                .is_some_and(|tabs| tabs.is_empty())
        );
    }

    #[test]
    fn unknown_tab_or_role_is_rejected() {
        let unknown_tab = serde_json::from_str::<UpdateTabOverridesRequest>(
            r#"{"overrides":{"user":["payroll"]}}"#,
        )
        .unwrap_or_else(|_| unreachable!());
        let unknown_role = serde_json::from_str::<UpdateTabOverridesRequest>(
            r#"{"overrides":{"janitor":["dashboard"]}}"#,
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(matches!(unknown_tab.into_table(), Err(AppError::Validation(_))));
        assert!(matches!(unknown_role.into_table(), Err(AppError::Validation(_))));
    }

    #[test]
    fn permission_patches_parse_dotted_names() {
        let request = serde_json::from_str::<UpdatePermissionPatchesRequest>(
            r#"{"patches":{"manager":{"gantt.delete":true,"billing.edit":false}}}"#,
        )
        .unwrap_or_else(|_| unreachable!());

        let patches = request.into_patches().unwrap_or_default();
        let manager = patches.for_role(UserRole::Manager);

        assert_eq!(
            manager.and_then(|patch| patch.get(&Permission::GanttDelete)),
            Some(&true)
        );
        assert_eq!(
            manager.and_then(|patch| patch.get(&Permission::BillingEdit)),
            Some(&false)
        );
    }

    #[test]
    fn simulated_role_parses_or_is_absent() {
        let query = |value: Option<&str>| SimulatedRoleQuery {
            simulated_role: value.map(str::to_owned),
        };

        assert!(matches!(query(None).role(), Ok(None)));
        assert!(matches!(query(Some(" ")).role(), Ok(None)));
        assert!(matches!(
            query(Some("english_teacher")).role(),
            Ok(Some(UserRole::EnglishTeacher))
        ));
        assert!(matches!(
            query(Some("janitor")).role(),
            Err(AppError::Validation(_))
        ));
    }
}
