//! Tenant membership entries as they arrive from the host.
//!
//! A user's `tenants` collection is heterogeneous. Depending on how deep the
//! host populated the relation, one entry can be:
//!
//! ```text
//! "t1"                          bare identifier
//! { "id": "t2" }                identifier wrapper (`value` is accepted too)
//! { "tenant": "t3" }            relation holding a bare identifier
//! { "tenant": { "id": "t4" } }  relation holding a populated tenant
//! ```
//!
//! Deserialization is total: anything else becomes [`MembershipEntry::Malformed`]
//! and resolves to no tenant. Only [`crate::TenantIds`] should travel past the resolver.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TENANT_KEY: &str = "tenant";
const ID_KEY: &str = "id";
const VALUE_KEY: &str = "value";

/// One tenant membership in any accepted shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "Value")]
pub enum MembershipEntry {
    /// Bare tenant identifier.
    Id(String),
    /// Object with a `tenant` field.
    Relation { tenant: TenantRef },
    /// Object carrying the identifier under `id` or `value`.
    Reference {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Neither a string nor an object.
    Malformed(Value),
}

/// Value of the `tenant` field inside a relation entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "Value")]
pub enum TenantRef {
    Id(String),
    Reference {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Malformed(Value),
}

impl MembershipEntry {
    /// Relation entry pointing at `tenant_id`, the shape written for new users.
    #[must_use]
    pub fn relation(tenant_id: impl Into<String>) -> Self {
        Self::Relation {
            tenant: TenantRef::Id(tenant_id.into()),
        }
    }

    /// The tenant identifier this entry points at, if any.
    ///
    /// Empty strings count as missing.
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => non_empty(id),
            Self::Relation { tenant } => tenant.tenant_id(),
            Self::Reference { id, value } => id_or_value(id.as_deref(), value.as_deref()),
            Self::Malformed(_) => None,
        }
    }
}

impl TenantRef {
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => non_empty(id),
            Self::Reference { id, value } => id_or_value(id.as_deref(), value.as_deref()),
            Self::Malformed(_) => None,
        }
    }
}

impl From<Value> for MembershipEntry {
    fn from(raw: Value) -> Self {
        match raw {
            Value::String(id) => Self::Id(id),
            Value::Object(mut map) => match map.remove(TENANT_KEY) {
                Some(tenant) => Self::Relation {
                    tenant: TenantRef::from(tenant),
                },
                None => {
                    let (id, value) = id_and_value(&map);
                    Self::Reference { id, value }
                }
            },
            other => Self::Malformed(other),
        }
    }
}

impl From<Value> for TenantRef {
    fn from(raw: Value) -> Self {
        match raw {
            Value::String(id) => Self::Id(id),
            Value::Object(map) => {
                let (id, value) = id_and_value(&map);
                Self::Reference { id, value }
            }
            other => Self::Malformed(other),
        }
    }
}

fn id_and_value(map: &Map<String, Value>) -> (Option<String>, Option<String>) {
    let field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_owned);
    (field(ID_KEY), field(VALUE_KEY))
}

fn id_or_value<'a>(id: Option<&'a str>, value: Option<&'a str>) -> Option<&'a str> {
    id.and_then(non_empty).or_else(|| value.and_then(non_empty))
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
