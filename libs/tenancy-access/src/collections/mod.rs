//! Per-collection access predicates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tenancy_security::RequestContext;

use crate::decision::AccessDecision;
use crate::error::AccessError;

pub mod pages;
pub mod tenants;
pub mod users;

pub use pages::Pages;
pub use tenants::Tenants;
pub use users::Users;

/// Collections governed by the access core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Tenants,
    Users,
    Pages,
}

impl Collection {
    pub const ALL: [Self; 3] = [Self::Tenants, Self::Users, Self::Pages];

    /// Host slug of the collection.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Tenants => "tenants",
            Self::Users => "users",
            Self::Pages => "pages",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Collection {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| AccessError::UnknownCollection(s.to_owned()))
    }
}

/// Decision points of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    /// Visibility of the collection in the admin panel.
    Admin,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access predicates of one collection.
///
/// Implementations are pure: the same context always yields the same decision.
pub trait CollectionAccess: Send + Sync {
    fn collection(&self) -> Collection;

    fn create(&self, ctx: &RequestContext) -> AccessDecision;

    fn read(&self, ctx: &RequestContext) -> AccessDecision;

    fn update(&self, ctx: &RequestContext) -> AccessDecision;

    fn delete(&self, ctx: &RequestContext) -> AccessDecision;

    fn admin(&self, ctx: &RequestContext) -> AccessDecision;

    fn evaluate(&self, operation: Operation, ctx: &RequestContext) -> AccessDecision {
        match operation {
            Operation::Create => self.create(ctx),
            Operation::Read => self.read(ctx),
            Operation::Update => self.update(ctx),
            Operation::Delete => self.delete(ctx),
            Operation::Admin => self.admin(ctx),
        }
    }
}
