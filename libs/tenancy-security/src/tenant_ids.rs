use std::collections::BTreeSet;

use serde::Serialize;
use tracing::trace;

use crate::membership::MembershipEntry;
use crate::user::AuthUser;

/// Normalized set of tenant identifiers a user belongs to.
///
/// Holds only unique, non-empty identifiers. Callers use it for membership
/// tests; the iteration order is sorted but carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TenantIds(BTreeSet<String>);

impl TenantIds {
    /// Resolves the membership entries of `user`.
    ///
    /// An absent user, or a user without a membership collection, yields an
    /// empty set. Entries that do not name a tenant are dropped.
    #[must_use]
    pub fn resolve(user: Option<&AuthUser>) -> Self {
        match user.and_then(AuthUser::tenants) {
            Some(entries) => Self::from_entries(entries),
            None => Self::default(),
        }
    }

    #[must_use]
    pub fn from_entries(entries: &[MembershipEntry]) -> Self {
        let mut ids = BTreeSet::new();
        for (idx, entry) in entries.iter().enumerate() {
            match entry.tenant_id() {
                Some(id) => {
                    ids.insert(id.to_owned());
                }
                None => trace!(idx, "dropping membership entry without a tenant id"),
            }
        }
        Self(ids)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, tenant_id: &str) -> bool {
        self.0.contains(tenant_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TenantIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .filter(|id: &String| !id.is_empty())
                .collect(),
        )
    }
}

impl IntoIterator for TenantIds {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Tenant identifiers of `user`; see [`TenantIds::resolve`].
#[must_use]
pub fn resolve_tenant_ids(user: Option<&AuthUser>) -> TenantIds {
    TenantIds::resolve(user)
}
