use std::str::FromStr;

use hagwon_core::AppError;
use serde::{Deserialize, Serialize};

/// Navigable areas of the academy workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AppTab {
    /// Landing dashboard.
    Dashboard,
    /// Shared academy calendar.
    Calendar,
    /// Department timetables.
    Timetable,
    /// Class attendance book.
    Attendance,
    /// Daily attendance sheet.
    DailyAttendance,
    /// Tuition payment reports.
    Payment,
    /// Project gantt board.
    Gantt,
    /// Parent consultation log.
    Consultation,
    /// Student directory.
    Students,
    /// Grades and exams.
    Grades,
    /// Class list.
    Classes,
    /// Classroom schedule.
    Classroom,
    /// Classroom allocation.
    ClassroomAssignment,
    /// Student consultation records.
    StudentConsultations,
    /// Staff directory.
    Staff,
    /// Billing.
    Billing,
    /// Role and permission administration.
    RoleManagement,
    /// Shared resources.
    Resources,
    /// Withdrawal tracking.
    Withdrawal,
}

impl AppTab {
    /// Returns a stable storage value for this tab.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Calendar => "calendar",
            Self::Timetable => "timetable",
            Self::Attendance => "attendance",
            Self::DailyAttendance => "daily-attendance",
            Self::Payment => "payment",
            Self::Gantt => "gantt",
            Self::Consultation => "consultation",
            Self::Students => "students",
            Self::Grades => "grades",
            Self::Classes => "classes",
            Self::Classroom => "classroom",
            Self::ClassroomAssignment => "classroom-assignment",
            Self::StudentConsultations => "student-consultations",
            Self::Staff => "staff",
            Self::Billing => "billing",
            Self::RoleManagement => "role-management",
            Self::Resources => "resources",
            Self::Withdrawal => "withdrawal",
        }
    }

    /// Returns all tabs in menu universe order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AppTab] = &[
            AppTab::Dashboard,
            AppTab::Calendar,
            AppTab::Timetable,
            AppTab::Attendance,
            AppTab::DailyAttendance,
            AppTab::Payment,
            AppTab::Gantt,
            AppTab::Consultation,
            AppTab::Students,
            AppTab::Grades,
            AppTab::Classes,
            AppTab::Classroom,
            AppTab::ClassroomAssignment,
            AppTab::StudentConsultations,
            AppTab::Staff,
            AppTab::Billing,
            AppTab::RoleManagement,
            AppTab::Resources,
            AppTab::Withdrawal,
        ];

        ALL
    }
}

impl FromStr for AppTab {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|tab| tab.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown tab '{value}'")))
    }
}

impl TryFrom<String> for AppTab {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<AppTab> for &'static str {
    fn from(value: AppTab) -> Self {
        value.as_str()
    }
}

/// An ordered navigation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabGroup {
    id: &'static str,
    label: &'static str,
    order: u8,
    tabs: &'static [AppTab],
}

impl TabGroup {
    /// Returns the stable group identifier.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the menu label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the menu position.
    #[must_use]
    pub fn order(&self) -> u8 {
        self.order
    }

    /// Returns the tabs listed in this group, in display order.
    #[must_use]
    pub fn tabs(&self) -> &'static [AppTab] {
        self.tabs
    }

    /// Returns all groups in menu order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const GROUPS: &[TabGroup] = &[
            TabGroup {
                id: "home",
                label: "홈",
                order: 0,
                tabs: &[AppTab::Dashboard],
            },
            TabGroup {
                id: "schedule",
                label: "일정",
                order: 1,
                tabs: &[AppTab::Calendar, AppTab::Gantt],
            },
            TabGroup {
                id: "class",
                label: "수업",
                order: 2,
                tabs: &[
                    AppTab::Timetable,
                    AppTab::Attendance,
                    AppTab::DailyAttendance,
                    AppTab::Classes,
                    AppTab::Classroom,
                    AppTab::ClassroomAssignment,
                ],
            },
            TabGroup {
                id: "student",
                label: "학생",
                order: 3,
                tabs: &[
                    AppTab::Students,
                    AppTab::Consultation,
                    AppTab::StudentConsultations,
                    AppTab::Grades,
                    AppTab::Withdrawal,
                ],
            },
            TabGroup {
                id: "admin",
                label: "관리",
                order: 4,
                tabs: &[
                    AppTab::Payment,
                    AppTab::Staff,
                    AppTab::Billing,
                    AppTab::Resources,
                ],
            },
            TabGroup {
                id: "system",
                label: "시스템",
                order: 5,
                tabs: &[AppTab::RoleManagement],
            },
        ];

        GROUPS
    }
}
