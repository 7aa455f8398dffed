use super::*;

impl AccessService {
    /// Returns the tabs the caller may open, in menu order.
    ///
    /// Unknown or unapproved accounts get no tabs. A super-role caller may
    /// preview the tabs of `simulated_role`; other callers ignore it.
    pub async fn accessible_tabs(
        &self,
        actor: &UserIdentity,
        simulated_role: Option<UserRole>,
    ) -> AppResult<Vec<AppTab>> {
        let Some(role) = self.resolution_role(actor, simulated_role).await? else {
            return Ok(Vec::new());
        };

        let overrides = self
            .config_repository
            .find_tab_overrides(actor.tenant_id())
            .await?;

        Ok(self
            .tab_resolver
            .all_accessible_capabilities(role, overrides.as_ref()))
    }

    /// Returns whether the caller may open `tab`.
    pub async fn can_access_tab(&self, actor: &UserIdentity, tab: AppTab) -> AppResult<bool> {
        let Some(profile) = self.approved_profile(actor).await? else {
            return Ok(false);
        };

        let overrides = self
            .config_repository
            .find_tab_overrides(actor.tenant_id())
            .await?;

        Ok(self
            .tab_resolver
            .has_capability(profile.role(), tab, overrides.as_ref()))
    }

    /// Ensures the caller may open `tab`.
    pub async fn require_tab(&self, actor: &UserIdentity, tab: AppTab) -> AppResult<()> {
        if self.can_access_tab(actor, tab).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{}' cannot open tab '{}' in tenant '{}'",
            actor.subject(),
            tab.as_str(),
            actor.tenant_id()
        )))
    }

    /// Returns the navigation groups narrowed to accessible tabs.
    ///
    /// Groups left without any accessible tab are omitted.
    pub async fn accessible_tab_groups(
        &self,
        actor: &UserIdentity,
        simulated_role: Option<UserRole>,
    ) -> AppResult<Vec<AccessibleTabGroup>> {
        let accessible = self.accessible_tabs(actor, simulated_role).await?;

        Ok(TabGroup::all()
            .iter()
            .filter_map(|group| {
                let tabs = group
                    .tabs()
                    .iter()
                    .copied()
                    .filter(|tab| accessible.contains(tab))
                    .collect::<Vec<_>>();

                (!tabs.is_empty()).then_some(AccessibleTabGroup {
                    group: *group,
                    tabs,
                })
            })
            .collect())
    }
}
