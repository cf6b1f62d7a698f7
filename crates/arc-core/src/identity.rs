use serde::{Deserialize, Serialize};

/// An Azure subscription selected by the user.
///
/// Owned by the auth layer and referenced by value everywhere else.
/// Field order defines the derived ordering: subscription id first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription GUID.
    pub id: String,
    /// Azure AD tenant the subscription belongs to.
    pub tenant_id: String,
    /// Human-readable subscription name.
    #[serde(default)]
    pub display_name: String,
}

impl Subscription {
    #[must_use]
    pub fn new(id: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tenant_id: tenant_id.into(),
            display_name: String::new(),
        }
    }
}

/// The currently signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account name (UPN or service principal id).
    pub user: String,
    /// Home tenant of the account.
    pub tenant_id: String,
}

impl Principal {
    #[must_use]
    pub fn new(user: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            tenant_id: tenant_id.into(),
        }
    }
}
