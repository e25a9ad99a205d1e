use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Role tag the core acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Universal override: unconditional access everywhere.
    SuperAdmin,
    /// Manages users and content inside their own tenants.
    TenantAdmin,
    /// Edits content inside their own tenants.
    TenantEditor,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::SuperAdmin, Self::TenantAdmin, Self::TenantEditor];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super-admin",
            Self::TenantAdmin => "tenant-admin",
            Self::TenantEditor => "tenant-editor",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == tag)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unordered set of role tags.
///
/// Roles combine additively; `super-admin` anywhere in the set wins. Tags the
/// core does not know grant nothing but are kept, so a snapshot serializes
/// back to the tags it was read from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RoleSet {
    known: BTreeSet<Role>,
    other: BTreeSet<String>,
}

impl RoleSet {
    #[inline]
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.known.contains(&role)
    }

    /// Returns true if any of `roles` is present.
    #[must_use]
    pub fn contains_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.known.contains(r))
    }

    #[inline]
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.contains(Role::SuperAdmin)
    }

    /// True when no tag at all is present, recognized or not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.other.is_empty()
    }

    pub fn insert(&mut self, role: Role) -> bool {
        self.known.insert(role)
    }

    /// Tags outside [`Role`], in sorted order.
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> + '_ {
        self.other.iter().map(String::as_str)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self {
            known: iter.into_iter().collect(),
            other: BTreeSet::new(),
        }
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(tags: Vec<String>) -> Self {
        let mut set = Self::default();
        for tag in tags {
            match Role::from_tag(&tag) {
                Some(role) => {
                    set.known.insert(role);
                }
                None => {
                    set.other.insert(tag);
                }
            }
        }
        set
    }
}

impl From<RoleSet> for Vec<String> {
    fn from(set: RoleSet) -> Self {
        let mut tags: BTreeSet<String> = set.other;
        tags.extend(set.known.into_iter().map(|r| r.as_str().to_owned()));
        tags.into_iter().collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_do_not_fail_deserialization() {
        let roles: RoleSet =
            serde_json::from_str(r#"["tenant-editor", "billing-viewer", "super-admin"]"#).unwrap();

        assert!(roles.is_super_admin());
        assert!(roles.contains(Role::TenantEditor));
        assert!(!roles.contains(Role::TenantAdmin));
        assert_eq!(roles.unrecognized().collect::<Vec<_>>(), ["billing-viewer"]);
    }

    #[test]
    fn unknown_tags_survive_reserialization() {
        let roles: RoleSet = serde_json::from_str(r#"["tenant-editor", "billing-viewer"]"#).unwrap();

        let json = serde_json::to_value(&roles).unwrap();

        assert_eq!(json, serde_json::json!(["billing-viewer", "tenant-editor"]));
    }

    #[test]
    fn only_unknown_tags_is_not_empty() {
        let roles: RoleSet = serde_json::from_str(r#"["auditor"]"#).unwrap();

        assert!(!roles.is_empty());
        assert!(!roles.contains_any(&Role::ALL));
    }

    #[test]
    fn roles_are_additive() {
        let roles: RoleSet = [Role::TenantAdmin, Role::TenantEditor].into_iter().collect();

        assert!(!roles.is_super_admin());
        assert!(roles.contains_any(&[Role::TenantEditor]));
        assert!(roles.contains_any(&[Role::SuperAdmin, Role::TenantAdmin]));
        assert!(!roles.contains_any(&[Role::SuperAdmin]));
    }

    #[test]
    fn display_matches_wire_tag() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{role}\""));
            assert_eq!(Role::from_tag(role.as_str()), Some(role));
        }
    }
}
