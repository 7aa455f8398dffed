use async_trait::async_trait;
use hagwon_core::{AppResult, TenantId};
use hagwon_domain::{AuditAction, UserRole};

/// What an access administration event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditTarget {
    /// The academy's tab override table.
    TabOverrides,
    /// The academy's permission patch table.
    PermissionPatches,
    /// One staff account, by identity-provider subject.
    UserProfile(String),
}

impl AuditTarget {
    /// Returns a stable storage value for the target kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TabOverrides => "tab_overrides",
            Self::PermissionPatches => "permission_patches",
            Self::UserProfile(_) => "user_profile",
        }
    }

    /// Returns the affected account, for account targets.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::UserProfile(subject) => Some(subject.as_str()),
            Self::TabOverrides | Self::PermissionPatches => None,
        }
    }
}

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Academy scope for the event.
    pub tenant_id: TenantId,
    /// Subject that performed the action.
    pub actor_subject: String,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// What was changed.
    pub target: AuditTarget,
    /// Roles whose capabilities or assignment the change touched.
    pub affected_roles: Vec<UserRole>,
    /// Optional human-readable detail.
    pub detail: Option<String>,
}

impl AuditEvent {
    /// Returns the storage values of the affected roles.
    #[must_use]
    pub fn affected_role_names(&self) -> Vec<&'static str> {
        self.affected_roles.iter().map(UserRole::as_str).collect()
    }
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
