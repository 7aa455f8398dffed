//! Role to capability tables.
//!
//! A capability is anything a role can be granted: a navigable tab or a
//! granular permission. The compiled-in default tables are built once and
//! never mutated; per-academy overrides and patches arrive as snapshots.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::security::{Permission, UserRole};
use crate::tabs::AppTab;

/// A grantable capability with a fixed, ordered universe.
pub trait Capability: Copy + Ord + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Returns every known capability in canonical order.
    fn universe() -> &'static [Self];
}

impl Capability for AppTab {
    fn universe() -> &'static [Self] {
        Self::all()
    }
}

impl Capability for Permission {
    fn universe() -> &'static [Self] {
        Self::all()
    }
}

/// Role to capability-set mapping.
///
/// Serialized as `{ "<role>": ["<capability>", ...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(serialize = "C: Serialize", deserialize = "C: Capability")
)]
pub struct RoleAccessTable<C> {
    entries: BTreeMap<UserRole, BTreeSet<C>>,
}

impl<C: Capability> Default for RoleAccessTable<C> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<C: Capability> RoleAccessTable<C> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry for `role`.
    #[must_use]
    pub fn with_role(mut self, role: UserRole, capabilities: impl IntoIterator<Item = C>) -> Self {
        self.insert(role, capabilities);
        self
    }

    /// Adds or replaces the entry for `role`.
    pub fn insert(&mut self, role: UserRole, capabilities: impl IntoIterator<Item = C>) {
        self.entries
            .insert(role, capabilities.into_iter().collect());
    }

    /// Returns the entry for `role`, if the table has one.
    #[must_use]
    pub fn get(&self, role: UserRole) -> Option<&BTreeSet<C>> {
        self.entries.get(&role)
    }

    /// Returns the roles present in the table.
    pub fn roles(&self) -> impl Iterator<Item = UserRole> + '_ {
        self.entries.keys().copied()
    }

    /// Returns whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in role order.
    pub fn iter(&self) -> impl Iterator<Item = (UserRole, &BTreeSet<C>)> + '_ {
        self.entries
            .iter()
            .map(|(role, capabilities)| (*role, capabilities))
    }
}

/// Key-wise permission adjustments merged onto the default permission table.
///
/// `true` grants, `false` revokes; permissions a patch does not mention keep
/// their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePermissionPatches {
    entries: BTreeMap<UserRole, BTreeMap<Permission, bool>>,
}

impl RolePermissionPatches {
    /// Creates an empty patch table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one adjustment for `role`.
    #[must_use]
    pub fn with_patch(mut self, role: UserRole, permission: Permission, granted: bool) -> Self {
        self.entries
            .entry(role)
            .or_default()
            .insert(permission, granted);
        self
    }

    /// Returns the adjustments recorded for `role`.
    #[must_use]
    pub fn for_role(&self, role: UserRole) -> Option<&BTreeMap<Permission, bool>> {
        self.entries.get(&role)
    }

    /// Returns the roles that carry adjustments.
    pub fn roles(&self) -> impl Iterator<Item = UserRole> + '_ {
        self.entries.keys().copied()
    }

    /// Returns whether no role carries adjustments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }

    /// Applies the adjustments for `role` to `base`.
    #[must_use]
    pub fn apply(&self, role: UserRole, base: &BTreeSet<Permission>) -> BTreeSet<Permission> {
        let mut merged = base.clone();
        if let Some(patch) = self.for_role(role) {
            for (permission, granted) in patch {
                if *granted {
                    merged.insert(*permission);
                } else {
                    merged.remove(permission);
                }
            }
        }

        merged
    }
}

static DEFAULT_TAB_TABLE: LazyLock<RoleAccessTable<AppTab>> = LazyLock::new(build_default_tabs);

static DEFAULT_PERMISSION_TABLE: LazyLock<RoleAccessTable<Permission>> =
    LazyLock::new(build_default_permissions);

/// Returns the compiled-in tab table.
#[must_use]
pub fn default_tab_table() -> &'static RoleAccessTable<AppTab> {
    &DEFAULT_TAB_TABLE
}

/// Returns the compiled-in permission table.
#[must_use]
pub fn default_permission_table() -> &'static RoleAccessTable<Permission> {
    &DEFAULT_PERMISSION_TABLE
}

fn build_default_tabs() -> RoleAccessTable<AppTab> {
    use AppTab::*;

    let all_tabs = AppTab::all().iter().copied();
    let manager_tabs = AppTab::all()
        .iter()
        .copied()
        .filter(|tab| !matches!(tab, Payment | Gantt | RoleManagement));
    let lead_tabs = [
        Dashboard,
        Calendar,
        Timetable,
        Attendance,
        DailyAttendance,
        Consultation,
        Students,
        Grades,
        Classes,
        Classroom,
        ClassroomAssignment,
        StudentConsultations,
        Withdrawal,
    ];
    let teacher_tabs = [
        Dashboard,
        Calendar,
        Timetable,
        Attendance,
        DailyAttendance,
        Consultation,
        Students,
        Grades,
    ];

    RoleAccessTable::new()
        .with_role(UserRole::Master, all_tabs.clone())
        .with_role(UserRole::Admin, all_tabs)
        .with_role(UserRole::Manager, manager_tabs)
        .with_role(UserRole::MathLead, lead_tabs)
        .with_role(UserRole::EnglishLead, lead_tabs)
        .with_role(UserRole::MathTeacher, teacher_tabs)
        .with_role(UserRole::EnglishTeacher, teacher_tabs)
        .with_role(
            UserRole::User,
            [Dashboard, Calendar, Attendance, DailyAttendance],
        )
}

fn build_default_permissions() -> RoleAccessTable<Permission> {
    use Permission::*;

    const EVENTS_BASIC: [Permission; 4] =
        [EventsCreate, EventsManageOwn, EventsDragMove, EventsAttendance];
    const CONSULTATION_ALL: [Permission; 5] = [
        ConsultationView,
        ConsultationCreate,
        ConsultationEdit,
        ConsultationConvert,
        ConsultationManage,
    ];
    const GRADES_ALL: [Permission; 3] = [GradesView, GradesEdit, GradesManageExams];
    const STUDENTS_MANAGE: [Permission; 4] = [
        StudentsView,
        StudentsEdit,
        StudentsManageClassHistory,
        StudentsEditEnrollmentDates,
    ];

    let admin = Permission::all().iter().copied().filter(|permission| {
        !matches!(
            permission,
            UsersChangeRole | SettingsRolePermissions | TimetableMathSimulation | RolesManage
        )
    });

    let manager = [
        EventsCreate,
        EventsManageOwn,
        EventsManageOthers,
        EventsDragMove,
        EventsAttendance,
        EventsBucket,
        DepartmentsViewAll,
        UsersView,
        SettingsAccess,
        TimetableMathView,
        TimetableMathEdit,
        TimetableEnglishView,
        TimetableEnglishEdit,
        TimetableEnglishSimulation,
        TimetableEnglishBackupView,
        TimetableScienceView,
        TimetableScienceEdit,
        TimetableKoreanView,
        TimetableKoreanEdit,
        TimetableIntegratedView,
        GanttView,
        GanttCreate,
        GanttEdit,
        AttendanceManageOwn,
        AttendanceEditAll,
        AttendanceManageMath,
        AttendanceManageEnglish,
        AttendanceManageScience,
        AttendanceManageKorean,
        AttendanceEditStudentInfo,
        ClassesView,
        ClassesCreate,
        ClassesEdit,
        BillingView,
        BillingEdit,
        WithdrawalView,
        WithdrawalEdit,
        WithdrawalReactivate,
        ResourcesEdit,
    ]
    .into_iter()
    .chain(STUDENTS_MANAGE)
    .chain(CONSULTATION_ALL)
    .chain(GRADES_ALL);

    let lead_common = EVENTS_BASIC
        .into_iter()
        .chain([
            DepartmentsViewAll,
            SettingsAccess,
            SystemTeachersView,
            SystemClassesView,
            SystemClassesEdit,
            TimetableMathView,
            TimetableEnglishView,
            TimetableScienceView,
            TimetableKoreanView,
            TimetableIntegratedView,
            AttendanceManageOwn,
            AttendanceEditAll,
            AttendanceEditStudentInfo,
            ClassesView,
            ClassesCreate,
            ClassesEdit,
            BillingView,
            WithdrawalView,
            WithdrawalEdit,
        ])
        .chain(STUDENTS_MANAGE)
        .chain(CONSULTATION_ALL)
        .chain(GRADES_ALL)
        .collect::<Vec<_>>();
    let math_lead = lead_common
        .iter()
        .copied()
        .chain([TimetableMathEdit, AttendanceManageMath]);
    let english_lead = lead_common.iter().copied().chain([
        TimetableEnglishEdit,
        TimetableEnglishSimulation,
        TimetableEnglishBackupView,
        AttendanceManageEnglish,
    ]);

    let teacher_common = EVENTS_BASIC
        .into_iter()
        .chain([
            DepartmentsViewAll,
            SystemTeachersView,
            SystemClassesView,
            AttendanceManageOwn,
            StudentsView,
            ClassesView,
            ConsultationView,
            ConsultationCreate,
            ConsultationEdit,
            GradesView,
            GradesEdit,
            WithdrawalView,
        ])
        .collect::<Vec<_>>();
    let math_teacher = teacher_common
        .iter()
        .copied()
        .chain([TimetableMathView]);
    let english_teacher = teacher_common
        .iter()
        .copied()
        .chain([TimetableEnglishView]);

    let user = EVENTS_BASIC
        .into_iter()
        .chain([DepartmentsViewAll, StudentsView, ConsultationView, GradesView]);

    RoleAccessTable::new()
        .with_role(UserRole::Master, Permission::all().iter().copied())
        .with_role(UserRole::Admin, admin)
        .with_role(UserRole::Manager, manager)
        .with_role(UserRole::MathLead, math_lead)
        .with_role(UserRole::EnglishLead, english_lead)
        .with_role(UserRole::MathTeacher, math_teacher)
        .with_role(UserRole::EnglishTeacher, english_teacher)
        .with_role(UserRole::User, user)
}
