use serde::{Deserialize, Deserializer, Serialize};

use crate::membership::MembershipEntry;
use crate::role::{Role, RoleSet};

/// Request-time snapshot of an authenticated user.
///
/// The host has already verified the credentials; this type only carries what
/// access decisions need. Unknown fields of the host's user document are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    roles: RoleSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tenants: Option<Vec<MembershipEntry>>,
}

impl AuthUser {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: RoleSet::default(),
            tenants: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        for role in roles {
            self.roles.insert(role);
        }
        self
    }

    #[must_use]
    pub fn with_tenants(mut self, tenants: Vec<MembershipEntry>) -> Self {
        self.tenants = Some(tenants);
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Raw membership entries, `None` when the user has no membership collection.
    #[must_use]
    pub fn tenants(&self) -> Option<&[MembershipEntry]> {
        self.tenants.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.roles.is_super_admin()
    }

    #[inline]
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
