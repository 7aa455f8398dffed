use serde::{Deserialize, Serialize};

use crate::TenantId;

/// Authenticated caller as asserted by the upstream identity provider.
///
/// Role and approval status are not part of the identity; they live on the
/// academy's user profile and are looked up per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    tenant_id: TenantId,
}

impl UserIdentity {
    /// Creates a user identity from authentication and tenancy data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        tenant_id: TenantId,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            tenant_id,
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the academy linked to the identity.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
