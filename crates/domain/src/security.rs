use std::str::FromStr;

use hagwon_core::AppError;
use serde::{Deserialize, Serialize};

/// Academy staff roles.
///
/// The first eight roles are ranked, highest first. The remaining roles are
/// legacy values still found on stored profiles; they are unranked and carry
/// no compiled-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum UserRole {
    /// Academy owner; always holds every capability.
    Master,
    /// Academy administrator.
    Admin,
    /// Operations manager.
    Manager,
    /// Head of the math department.
    MathLead,
    /// Head of the english department.
    EnglishLead,
    /// Math teacher.
    MathTeacher,
    /// English teacher.
    EnglishTeacher,
    /// Basic staff account.
    User,
    /// Legacy generic teacher role.
    Teacher,
    /// Legacy generic staff role.
    Staff,
    /// Legacy editor role.
    Editor,
    /// Legacy senior staff role.
    SeniorStaff,
    /// Legacy read-only role.
    Viewer,
}

impl UserRole {
    /// The role that always resolves to every capability.
    pub const SUPER: Self = Self::Master;

    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::MathLead => "math_lead",
            Self::EnglishLead => "english_lead",
            Self::MathTeacher => "math_teacher",
            Self::EnglishTeacher => "english_teacher",
            Self::User => "user",
            Self::Teacher => "teacher",
            Self::Staff => "staff",
            Self::Editor => "editor",
            Self::SeniorStaff => "senior_staff",
            Self::Viewer => "viewer",
        }
    }

    /// Returns the ranked roles, highest first.
    #[must_use]
    pub fn hierarchy() -> &'static [Self] {
        const HIERARCHY: &[UserRole] = &[
            UserRole::Master,
            UserRole::Admin,
            UserRole::Manager,
            UserRole::MathLead,
            UserRole::EnglishLead,
            UserRole::MathTeacher,
            UserRole::EnglishTeacher,
            UserRole::User,
        ];

        HIERARCHY
    }

    /// Returns all known roles, ranked roles first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[UserRole] = &[
            UserRole::Master,
            UserRole::Admin,
            UserRole::Manager,
            UserRole::MathLead,
            UserRole::EnglishLead,
            UserRole::MathTeacher,
            UserRole::EnglishTeacher,
            UserRole::User,
            UserRole::Teacher,
            UserRole::Staff,
            UserRole::Editor,
            UserRole::SeniorStaff,
            UserRole::Viewer,
        ];

        ALL
    }

    /// Returns the position in the hierarchy (0 is highest), if ranked.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        Self::hierarchy().iter().position(|role| role == self)
    }

    /// Returns whether this role may hand `target` to someone.
    ///
    /// Only strictly lower ranked roles can be assigned. Unranked roles can
    /// neither assign nor be assigned.
    #[must_use]
    pub fn can_assign(&self, target: Self) -> bool {
        match (self.rank(), target.rank()) {
            (Some(own), Some(other)) => own < other,
            _ => false,
        }
    }

    /// Returns the roles this role may assign, highest first.
    #[must_use]
    pub fn assignable_roles(&self) -> Vec<Self> {
        Self::hierarchy()
            .iter()
            .copied()
            .filter(|target| self.can_assign(*target))
            .collect()
    }

    /// Returns the role capabilities resolve for when previewing as
    /// `simulated`.
    ///
    /// Only the super role may preview another role; every other role, and
    /// the super role without a preview, keeps its own.
    #[must_use]
    pub fn effective_role(actual: Option<Self>, simulated: Option<Self>) -> Option<Self> {
        match (actual, simulated) {
            (Some(Self::SUPER), Some(simulated)) => Some(simulated),
            (actual, _) => actual,
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "master" => Ok(Self::Master),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "math_lead" => Ok(Self::MathLead),
            "english_lead" => Ok(Self::EnglishLead),
            "math_teacher" => Ok(Self::MathTeacher),
            "english_teacher" => Ok(Self::EnglishTeacher),
            "user" => Ok(Self::User),
            "teacher" => Ok(Self::Teacher),
            "staff" => Ok(Self::Staff),
            "editor" => Ok(Self::Editor),
            "senior_staff" => Ok(Self::SeniorStaff),
            "viewer" => Ok(Self::Viewer),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<UserRole> for &'static str {
    fn from(value: UserRole) -> Self {
        value.as_str()
    }
}

/// Granular permissions checked by academy features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Permission {
    /// Allows creating calendar events.
    EventsCreate,
    /// Allows editing and deleting own calendar events.
    EventsManageOwn,
    /// Allows editing and deleting other staff members' events.
    EventsManageOthers,
    /// Allows moving events by drag and drop.
    EventsDragMove,
    /// Allows recording event participation.
    EventsAttendance,
    /// Allows managing the bucket list.
    EventsBucket,
    /// Allows viewing every department calendar.
    DepartmentsViewAll,
    /// Allows creating and editing departments.
    DepartmentsManage,
    /// Allows viewing user accounts.
    UsersView,
    /// Allows approving pending accounts.
    UsersApprove,
    /// Allows changing a user's role.
    UsersChangeRole,
    /// Allows changing a user's department visibility.
    UsersChangePermissions,
    /// Allows opening the settings screen.
    SettingsAccess,
    /// Allows managing holidays.
    SettingsHolidays,
    /// Allows editing role permission tables.
    SettingsRolePermissions,
    /// Allows managing event categories.
    SettingsManageCategories,
    /// Allows viewing the teacher directory.
    SystemTeachersView,
    /// Allows editing the teacher directory.
    SystemTeachersEdit,
    /// Allows viewing the class directory.
    SystemClassesView,
    /// Allows editing the class directory.
    SystemClassesEdit,
    /// Allows viewing the math timetable.
    TimetableMathView,
    /// Allows editing the math timetable.
    TimetableMathEdit,
    /// Allows viewing the english timetable.
    TimetableEnglishView,
    /// Allows editing the english timetable.
    TimetableEnglishEdit,
    /// Allows running english timetable simulations.
    TimetableEnglishSimulation,
    /// Allows running math timetable simulations.
    TimetableMathSimulation,
    /// Allows viewing english timetable backups.
    TimetableEnglishBackupView,
    /// Allows restoring english timetable backups.
    TimetableEnglishBackupRestore,
    /// Allows viewing the science timetable.
    TimetableScienceView,
    /// Allows editing the science timetable.
    TimetableScienceEdit,
    /// Allows viewing the korean timetable.
    TimetableKoreanView,
    /// Allows editing the korean timetable.
    TimetableKoreanEdit,
    /// Allows viewing the integrated timetable.
    TimetableIntegratedView,
    /// Allows viewing gantt charts.
    GanttView,
    /// Allows creating gantt projects.
    GanttCreate,
    /// Allows editing gantt projects.
    GanttEdit,
    /// Allows deleting gantt projects.
    GanttDelete,
    /// Allows taking attendance for own students.
    AttendanceManageOwn,
    /// Allows editing every attendance record.
    AttendanceEditAll,
    /// Allows managing math attendance sheets.
    AttendanceManageMath,
    /// Allows managing english attendance sheets.
    AttendanceManageEnglish,
    /// Allows managing science attendance sheets.
    AttendanceManageScience,
    /// Allows managing korean attendance sheets.
    AttendanceManageKorean,
    /// Allows editing student details from attendance.
    AttendanceEditStudentInfo,
    /// Allows configuring attendance session periods.
    AttendanceManageSessions,
    /// Allows viewing student records.
    StudentsView,
    /// Allows editing student records and enrollments.
    StudentsEdit,
    /// Allows deleting student records.
    StudentsDelete,
    /// Allows editing class enrollment history.
    StudentsManageClassHistory,
    /// Allows editing enrollment dates.
    StudentsEditEnrollmentDates,
    /// Allows viewing classes.
    ClassesView,
    /// Allows creating classes.
    ClassesCreate,
    /// Allows editing classes.
    ClassesEdit,
    /// Allows deleting classes.
    ClassesDelete,
    /// Allows viewing consultations.
    ConsultationView,
    /// Allows recording consultations.
    ConsultationCreate,
    /// Allows editing own consultations.
    ConsultationEdit,
    /// Allows converting prospects into students.
    ConsultationConvert,
    /// Allows viewing and editing every consultation.
    ConsultationManage,
    /// Allows viewing grades.
    GradesView,
    /// Allows entering grades.
    GradesEdit,
    /// Allows managing exam definitions.
    GradesManageExams,
    /// Allows viewing billing records.
    BillingView,
    /// Allows editing billing records.
    BillingEdit,
    /// Allows viewing withdrawals.
    WithdrawalView,
    /// Allows processing withdrawals.
    WithdrawalEdit,
    /// Allows reactivating withdrawn students.
    WithdrawalReactivate,
    /// Allows editing the resource library.
    ResourcesEdit,
    /// Allows viewing role configuration.
    RolesView,
    /// Allows managing role configuration.
    RolesManage,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventsCreate => "events.create",
            Self::EventsManageOwn => "events.manage_own",
            Self::EventsManageOthers => "events.manage_others",
            Self::EventsDragMove => "events.drag_move",
            Self::EventsAttendance => "events.attendance",
            Self::EventsBucket => "events.bucket",
            Self::DepartmentsViewAll => "departments.view_all",
            Self::DepartmentsManage => "departments.manage",
            Self::UsersView => "users.view",
            Self::UsersApprove => "users.approve",
            Self::UsersChangeRole => "users.change_role",
            Self::UsersChangePermissions => "users.change_permissions",
            Self::SettingsAccess => "settings.access",
            Self::SettingsHolidays => "settings.holidays",
            Self::SettingsRolePermissions => "settings.role_permissions",
            Self::SettingsManageCategories => "settings.manage_categories",
            Self::SystemTeachersView => "system.teachers.view",
            Self::SystemTeachersEdit => "system.teachers.edit",
            Self::SystemClassesView => "system.classes.view",
            Self::SystemClassesEdit => "system.classes.edit",
            Self::TimetableMathView => "timetable.math.view",
            Self::TimetableMathEdit => "timetable.math.edit",
            Self::TimetableEnglishView => "timetable.english.view",
            Self::TimetableEnglishEdit => "timetable.english.edit",
            Self::TimetableEnglishSimulation => "timetable.english.simulation",
            Self::TimetableMathSimulation => "timetable.math.simulation",
            Self::TimetableEnglishBackupView => "timetable.english.backup.view",
            Self::TimetableEnglishBackupRestore => "timetable.english.backup.restore",
            Self::TimetableScienceView => "timetable.science.view",
            Self::TimetableScienceEdit => "timetable.science.edit",
            Self::TimetableKoreanView => "timetable.korean.view",
            Self::TimetableKoreanEdit => "timetable.korean.edit",
            Self::TimetableIntegratedView => "timetable.integrated.view",
            Self::GanttView => "gantt.view",
            Self::GanttCreate => "gantt.create",
            Self::GanttEdit => "gantt.edit",
            Self::GanttDelete => "gantt.delete",
            Self::AttendanceManageOwn => "attendance.manage_own",
            Self::AttendanceEditAll => "attendance.edit_all",
            Self::AttendanceManageMath => "attendance.manage_math",
            Self::AttendanceManageEnglish => "attendance.manage_english",
            Self::AttendanceManageScience => "attendance.manage_science",
            Self::AttendanceManageKorean => "attendance.manage_korean",
            Self::AttendanceEditStudentInfo => "attendance.edit_student_info",
            Self::AttendanceManageSessions => "attendance.manage_sessions",
            Self::StudentsView => "students.view",
            Self::StudentsEdit => "students.edit",
            Self::StudentsDelete => "students.delete",
            Self::StudentsManageClassHistory => "students.manage_class_history",
            Self::StudentsEditEnrollmentDates => "students.edit_enrollment_dates",
            Self::ClassesView => "classes.view",
            Self::ClassesCreate => "classes.create",
            Self::ClassesEdit => "classes.edit",
            Self::ClassesDelete => "classes.delete",
            Self::ConsultationView => "consultation.view",
            Self::ConsultationCreate => "consultation.create",
            Self::ConsultationEdit => "consultation.edit",
            Self::ConsultationConvert => "consultation.convert",
            Self::ConsultationManage => "consultation.manage",
            Self::GradesView => "grades.view",
            Self::GradesEdit => "grades.edit",
            Self::GradesManageExams => "grades.manage_exams",
            Self::BillingView => "billing.view",
            Self::BillingEdit => "billing.edit",
            Self::WithdrawalView => "withdrawal.view",
            Self::WithdrawalEdit => "withdrawal.edit",
            Self::WithdrawalReactivate => "withdrawal.reactivate",
            Self::ResourcesEdit => "resources.edit",
            Self::RolesView => "roles.view",
            Self::RolesManage => "roles.manage",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::EventsCreate,
            Permission::EventsManageOwn,
            Permission::EventsManageOthers,
            Permission::EventsDragMove,
            Permission::EventsAttendance,
            Permission::EventsBucket,
            Permission::DepartmentsViewAll,
            Permission::DepartmentsManage,
            Permission::UsersView,
            Permission::UsersApprove,
            Permission::UsersChangeRole,
            Permission::UsersChangePermissions,
            Permission::SettingsAccess,
            Permission::SettingsHolidays,
            Permission::SettingsRolePermissions,
            Permission::SettingsManageCategories,
            Permission::SystemTeachersView,
            Permission::SystemTeachersEdit,
            Permission::SystemClassesView,
            Permission::SystemClassesEdit,
            Permission::TimetableMathView,
            Permission::TimetableMathEdit,
            Permission::TimetableEnglishView,
            Permission::TimetableEnglishEdit,
            Permission::TimetableEnglishSimulation,
            Permission::TimetableMathSimulation,
            Permission::TimetableEnglishBackupView,
            Permission::TimetableEnglishBackupRestore,
            Permission::TimetableScienceView,
            Permission::TimetableScienceEdit,
            Permission::TimetableKoreanView,
            Permission::TimetableKoreanEdit,
            Permission::TimetableIntegratedView,
            Permission::GanttView,
            Permission::GanttCreate,
            Permission::GanttEdit,
            Permission::GanttDelete,
            Permission::AttendanceManageOwn,
            Permission::AttendanceEditAll,
            Permission::AttendanceManageMath,
            Permission::AttendanceManageEnglish,
            Permission::AttendanceManageScience,
            Permission::AttendanceManageKorean,
            Permission::AttendanceEditStudentInfo,
            Permission::AttendanceManageSessions,
            Permission::StudentsView,
            Permission::StudentsEdit,
            Permission::StudentsDelete,
            Permission::StudentsManageClassHistory,
            Permission::StudentsEditEnrollmentDates,
            Permission::ClassesView,
            Permission::ClassesCreate,
            Permission::ClassesEdit,
            Permission::ClassesDelete,
            Permission::ConsultationView,
            Permission::ConsultationCreate,
            Permission::ConsultationEdit,
            Permission::ConsultationConvert,
            Permission::ConsultationManage,
            Permission::GradesView,
            Permission::GradesEdit,
            Permission::GradesManageExams,
            Permission::BillingView,
            Permission::BillingEdit,
            Permission::WithdrawalView,
            Permission::WithdrawalEdit,
            Permission::WithdrawalReactivate,
            Permission::ResourcesEdit,
            Permission::RolesView,
            Permission::RolesManage,
        ];

        ALL
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "events.create" => Ok(Self::EventsCreate),
            "events.manage_own" => Ok(Self::EventsManageOwn),
            "events.manage_others" => Ok(Self::EventsManageOthers),
            "events.drag_move" => Ok(Self::EventsDragMove),
            "events.attendance" => Ok(Self::EventsAttendance),
            "events.bucket" => Ok(Self::EventsBucket),
            "departments.view_all" => Ok(Self::DepartmentsViewAll),
            "departments.manage" => Ok(Self::DepartmentsManage),
            "users.view" => Ok(Self::UsersView),
            "users.approve" => Ok(Self::UsersApprove),
            "users.change_role" => Ok(Self::UsersChangeRole),
            "users.change_permissions" => Ok(Self::UsersChangePermissions),
            "settings.access" => Ok(Self::SettingsAccess),
            "settings.holidays" => Ok(Self::SettingsHolidays),
            "settings.role_permissions" => Ok(Self::SettingsRolePermissions),
            "settings.manage_categories" => Ok(Self::SettingsManageCategories),
            "system.teachers.view" => Ok(Self::SystemTeachersView),
            "system.teachers.edit" => Ok(Self::SystemTeachersEdit),
            "system.classes.view" => Ok(Self::SystemClassesView),
            "system.classes.edit" => Ok(Self::SystemClassesEdit),
            "timetable.math.view" => Ok(Self::TimetableMathView),
            "timetable.math.edit" => Ok(Self::TimetableMathEdit),
            "timetable.english.view" => Ok(Self::TimetableEnglishView),
            "timetable.english.edit" => Ok(Self::TimetableEnglishEdit),
            "timetable.english.simulation" => Ok(Self::TimetableEnglishSimulation),
            "timetable.math.simulation" => Ok(Self::TimetableMathSimulation),
            "timetable.english.backup.view" => Ok(Self::TimetableEnglishBackupView),
            "timetable.english.backup.restore" => Ok(Self::TimetableEnglishBackupRestore),
            "timetable.science.view" => Ok(Self::TimetableScienceView),
            "timetable.science.edit" => Ok(Self::TimetableScienceEdit),
            "timetable.korean.view" => Ok(Self::TimetableKoreanView),
            "timetable.korean.edit" => Ok(Self::TimetableKoreanEdit),
            "timetable.integrated.view" => Ok(Self::TimetableIntegratedView),
            "gantt.view" => Ok(Self::GanttView),
            "gantt.create" => Ok(Self::GanttCreate),
            "gantt.edit" => Ok(Self::GanttEdit),
            "gantt.delete" => Ok(Self::GanttDelete),
            "attendance.manage_own" => Ok(Self::AttendanceManageOwn),
            "attendance.edit_all" => Ok(Self::AttendanceEditAll),
            "attendance.manage_math" => Ok(Self::AttendanceManageMath),
            "attendance.manage_english" => Ok(Self::AttendanceManageEnglish),
            "attendance.manage_science" => Ok(Self::AttendanceManageScience),
            "attendance.manage_korean" => Ok(Self::AttendanceManageKorean),
            "attendance.edit_student_info" => Ok(Self::AttendanceEditStudentInfo),
            "attendance.manage_sessions" => Ok(Self::AttendanceManageSessions),
            "students.view" => Ok(Self::StudentsView),
            "students.edit" => Ok(Self::StudentsEdit),
            "students.delete" => Ok(Self::StudentsDelete),
            "students.manage_class_history" => Ok(Self::StudentsManageClassHistory),
            "students.edit_enrollment_dates" => Ok(Self::StudentsEditEnrollmentDates),
            "classes.view" => Ok(Self::ClassesView),
            "classes.create" => Ok(Self::ClassesCreate),
            "classes.edit" => Ok(Self::ClassesEdit),
            "classes.delete" => Ok(Self::ClassesDelete),
            "consultation.view" => Ok(Self::ConsultationView),
            "consultation.create" => Ok(Self::ConsultationCreate),
            "consultation.edit" => Ok(Self::ConsultationEdit),
            "consultation.convert" => Ok(Self::ConsultationConvert),
            "consultation.manage" => Ok(Self::ConsultationManage),
            "grades.view" => Ok(Self::GradesView),
            "grades.edit" => Ok(Self::GradesEdit),
            "grades.manage_exams" => Ok(Self::GradesManageExams),
            "billing.view" => Ok(Self::BillingView),
            "billing.edit" => Ok(Self::BillingEdit),
            "withdrawal.view" => Ok(Self::WithdrawalView),
            "withdrawal.edit" => Ok(Self::WithdrawalEdit),
            "withdrawal.reactivate" => Ok(Self::WithdrawalReactivate),
            "resources.edit" => Ok(Self::ResourcesEdit),
            "roles.view" => Ok(Self::RolesView),
            "roles.manage" => Ok(Self::RolesManage),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

impl TryFrom<String> for Permission {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<Permission> for &'static str {
    fn from(value: Permission) -> Self {
        value.as_str()
    }
}

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when the tab override table is replaced.
    AccessTabOverridesUpdated,
    /// Emitted when the permission patch table is replaced.
    AccessPermissionPatchesUpdated,
    /// Emitted when a user's role changes.
    UserRoleChanged,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessTabOverridesUpdated => "access.tab_overrides.updated",
            Self::AccessPermissionPatchesUpdated => "access.permission_patches.updated",
            Self::UserRoleChanged => "user.role.changed",
        }
    }
}
