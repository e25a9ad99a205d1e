use serde_json::Value;

use crate::constraint::Constraint;

/// Outcome of one access predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Permitted on every record.
    GrantAll,
    /// Forbidden outright.
    DenyAll,
    /// Permitted only on records satisfying the constraint.
    Filter(Constraint),
}

impl AccessDecision {
    #[must_use]
    pub fn from_bool(allowed: bool) -> Self {
        if allowed { Self::GrantAll } else { Self::DenyAll }
    }

    #[must_use]
    pub fn is_grant_all(&self) -> bool {
        matches!(self, Self::GrantAll)
    }

    #[must_use]
    pub fn is_deny_all(&self) -> bool {
        matches!(self, Self::DenyAll)
    }

    #[must_use]
    pub fn constraint(&self) -> Option<&Constraint> {
        match self {
            Self::Filter(c) => Some(c),
            Self::GrantAll | Self::DenyAll => None,
        }
    }

    /// Short label used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GrantAll => "grant_all",
            Self::DenyAll => "deny_all",
            Self::Filter(_) => "filter",
        }
    }

    /// Host-facing value: `true`, `false` or a `where` document.
    #[must_use]
    pub fn to_host_value(&self) -> Value {
        match self {
            Self::GrantAll => Value::Bool(true),
            Self::DenyAll => Value::Bool(false),
            Self::Filter(c) => c.to_where(),
        }
    }

    /// Whether the decision admits `record`.
    ///
    /// Used for single documents the host already holds, such as the inbound
    /// payload of a create.
    #[must_use]
    pub fn permits(&self, record: &Value) -> bool {
        match self {
            Self::GrantAll => true,
            Self::DenyAll => false,
            Self::Filter(c) => c.matches(record),
        }
    }
}

impl From<bool> for AccessDecision {
    fn from(allowed: bool) -> Self {
        Self::from_bool(allowed)
    }
}

/// Access decision with the outright denial already split off.
///
/// Returned by [`crate::AccessPolicy::authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessScope {
    Unrestricted,
    Filtered(Constraint),
}

impl AccessScope {
    #[must_use]
    pub fn constraint(&self) -> Option<&Constraint> {
        match self {
            Self::Unrestricted => None,
            Self::Filtered(c) => Some(c),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn host_values() {
        assert_eq!(AccessDecision::GrantAll.to_host_value(), json!(true));
        assert_eq!(AccessDecision::DenyAll.to_host_value(), json!(false));
        assert_eq!(
            AccessDecision::Filter(Constraint::equals("id", "u1")).to_host_value(),
            json!({"id": {"equals": "u1"}})
        );
    }

    #[test]
    fn permits_single_documents() {
        let doc = json!({"id": "p1", "tenant": "t1"});

        assert!(AccessDecision::GrantAll.permits(&doc));
        assert!(!AccessDecision::DenyAll.permits(&doc));
        assert!(AccessDecision::Filter(Constraint::is_in("tenant", ["t1"])).permits(&doc));
        assert!(!AccessDecision::Filter(Constraint::is_in("tenant", ["t2"])).permits(&doc));
    }

    #[test]
    fn from_bool() {
        assert!(AccessDecision::from(true).is_grant_all());
        assert!(AccessDecision::from(false).is_deny_all());
    }
}
