//! Staff account profiles.

use std::str::FromStr;

use hagwon_core::{AppError, AppResult, NonEmptyString, non_blank};
use serde::{Deserialize, Serialize};

use crate::name_matching::PersonIdentity;
use crate::security::UserRole;

/// Approval state of a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Approved by an administrator; capabilities resolve normally.
    Approved,
    /// Awaiting approval.
    Pending,
    /// Rejected; resolves to no capabilities.
    Rejected,
}

impl AccountStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether capability resolution applies to this status.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl FromStr for AccountStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "approved" => Ok(Self::Approved),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::Validation(format!(
                "unknown account status '{value}'"
            ))),
        }
    }
}

/// A staff account as seen by access resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserProfileDocument", into = "UserProfileDocument")]
pub struct UserProfile {
    subject: NonEmptyString,
    role: UserRole,
    status: AccountStatus,
    display_name: NonEmptyString,
    alternate_name: Option<String>,
    staff_id: Option<String>,
}

impl UserProfile {
    /// Creates a validated profile.
    pub fn new(
        subject: impl Into<String>,
        role: UserRole,
        status: AccountStatus,
        display_name: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            subject: NonEmptyString::new(subject)?,
            role,
            status,
            display_name: NonEmptyString::new(display_name)?,
            alternate_name: None,
            staff_id: None,
        })
    }

    /// Sets the alternate (romanized) name used for roster matching.
    #[must_use]
    pub fn with_alternate_name(mut self, alternate_name: Option<String>) -> Self {
        self.alternate_name = non_blank(alternate_name);
        self
    }

    /// Links the account to a staff roster entry.
    #[must_use]
    pub fn with_staff_id(mut self, staff_id: Option<String>) -> Self {
        self.staff_id = non_blank(staff_id);
        self
    }

    /// Returns the identity-provider subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the assigned role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the approval status.
    #[must_use]
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the alternate name, if recorded.
    #[must_use]
    pub fn alternate_name(&self) -> Option<&str> {
        self.alternate_name.as_deref()
    }

    /// Returns the linked staff roster id, if any.
    #[must_use]
    pub fn staff_id(&self) -> Option<&str> {
        self.staff_id.as_deref()
    }

    /// Returns a copy with a different role.
    #[must_use]
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Returns the names this account is matched by.
    #[must_use]
    pub fn person_identity(&self) -> PersonIdentity {
        PersonIdentity::new(self.display_name(), self.alternate_name.clone())
    }
}

#[derive(Serialize, Deserialize)]
struct UserProfileDocument {
    subject: String,
    role: UserRole,
    status: AccountStatus,
    display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alternate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    staff_id: Option<String>,
}

impl TryFrom<UserProfileDocument> for UserProfile {
    type Error = AppError;

    fn try_from(value: UserProfileDocument) -> Result<Self, Self::Error> {
        Ok(
            Self::new(value.subject, value.role, value.status, value.display_name)?
                .with_alternate_name(value.alternate_name)
                .with_staff_id(value.staff_id),
        )
    }
}

impl From<UserProfile> for UserProfileDocument {
    fn from(value: UserProfile) -> Self {
        Self {
            subject: value.subject.into(),
            role: value.role,
            status: value.status,
            display_name: value.display_name.into(),
            alternate_name: value.alternate_name,
            staff_id: value.staff_id,
        }
    }
}
