//! Startup snapshot of academy rosters, classes and profiles.
//!
//! The snapshot file is a JSON array of tenant documents:
//!
//! ```json
//! [{
//!   "tenant_id": "6f1c...",
//!   "staff": [{ "id": "t1", "primary_name": "김선생", "alternate_name": "Kim" }],
//!   "students": [{ "id": "st1", "primary_name": "김철수", "external_id": "1234" }],
//!   "classes": [{ "class_id": "eng-a", "primary_owner_name": "Kim",
//!                 "slot_overrides": { "화-2": "이선생" } }],
//!   "profiles": [{ "subject": "kim", "role": "math_teacher",
//!                  "status": "approved", "display_name": "Kim" }],
//!   "tab_overrides": { "user": ["dashboard", "calendar"] },
//!   "permission_patches": { "manager": { "gantt.delete": true } }
//! }]
//! ```

use std::path::Path;

use hagwon_application::AccessConfigRepository;
use hagwon_core::{AppError, AppResult, TenantId};
use hagwon_domain::{
    AppTab, ClassSlotAssignment, RoleAccessTable, RolePermissionPatches, RosterEntry, UserProfile,
};
use serde::Deserialize;
use tracing::info;

use crate::{InMemoryAccessRepository, InMemoryRosterRepository};

/// Everything known about one academy at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantSnapshot {
    /// Academy identifier.
    pub tenant_id: TenantId,
    /// Staff roster in stored order.
    #[serde(default)]
    pub staff: Vec<RosterEntry>,
    /// Student roster in stored order.
    #[serde(default)]
    pub students: Vec<RosterEntry>,
    /// Class teacher assignments.
    #[serde(default)]
    pub classes: Vec<ClassSlotAssignment>,
    /// Staff account profiles.
    #[serde(default)]
    pub profiles: Vec<UserProfile>,
    /// Tab override table, when one was saved.
    #[serde(default)]
    pub tab_overrides: Option<RoleAccessTable<AppTab>>,
    /// Permission patch table, when one was saved.
    #[serde(default)]
    pub permission_patches: Option<RolePermissionPatches>,
}

/// Parses a snapshot document.
pub fn parse_snapshots(document: &str) -> AppResult<Vec<TenantSnapshot>> {
    serde_json::from_str(document)
        .map_err(|error| AppError::Validation(format!("invalid snapshot document: {error}")))
}

/// Reads and parses the snapshot file at `path`.
pub async fn load_snapshots(path: &Path) -> AppResult<Vec<TenantSnapshot>> {
    let document = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Internal(format!(
            "failed to read snapshot '{}': {error}",
            path.display()
        ))
    })?;

    parse_snapshots(document.as_str())
}

/// Seeds the in-memory repositories from parsed snapshots.
///
/// Access configuration goes to `access_config`, which may be a persistent
/// store; documents already saved there are left untouched.
pub async fn seed_repositories(
    snapshots: Vec<TenantSnapshot>,
    rosters: &InMemoryRosterRepository,
    profiles: &InMemoryAccessRepository,
    access_config: &dyn AccessConfigRepository,
) -> AppResult<()> {
    for snapshot in snapshots {
        let tenant_id = snapshot.tenant_id;
        info!(
            tenant_id = %tenant_id,
            staff = snapshot.staff.len(),
            students = snapshot.students.len(),
            classes = snapshot.classes.len(),
            profiles = snapshot.profiles.len(),
            "seeding tenant snapshot"
        );

        rosters
            .replace_tenant(
                tenant_id,
                snapshot.staff,
                snapshot.students,
                snapshot.classes,
            )
            .await;
        profiles.insert_profiles(tenant_id, snapshot.profiles).await;

        if let Some(table) = snapshot.tab_overrides
            && access_config.find_tab_overrides(tenant_id).await?.is_none()
        {
            access_config.save_tab_overrides(tenant_id, table).await?;
        }

        if let Some(patches) = snapshot.permission_patches
            && access_config
                .find_permission_patches(tenant_id)
                .await?
                .is_none()
        {
            access_config
                .save_permission_patches(tenant_id, patches)
                .await?;
        }
    }

    Ok(())
}
