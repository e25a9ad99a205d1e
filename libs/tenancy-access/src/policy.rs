//! Entry point for hosts: one object answering every access question.

use serde_json::{Map, Value};
use tenancy_security::RequestContext;
use tracing::{debug, instrument};

use crate::collections::{Collection, CollectionAccess, Operation, Pages, Tenants, Users};
use crate::config::TenancyConfig;
use crate::decision::{AccessDecision, AccessScope};
use crate::error::AccessError;
use crate::fields::FieldOperation;
use crate::hooks::TenantInheritance;

/// Access policy for all collections.
///
/// Built once from configuration and shared read-only; every method is a
/// pure function of its arguments.
///
/// ```ignore
/// let policy = AccessPolicy::new(&TenancyConfig::load(None)?);
/// let ctx = RequestContext::for_user(user);
///
/// match policy.evaluate(Collection::Users, Operation::Read, &ctx) {
///     AccessDecision::GrantAll => { /* no extra filter */ }
///     AccessDecision::DenyAll => { /* 403 */ }
///     AccessDecision::Filter(c) => { /* AND c onto the query */ }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    tenants: Tenants,
    users: Users,
    pages: Pages,
    inheritance: TenantInheritance,
}

impl AccessPolicy {
    #[must_use]
    pub fn new(cfg: &TenancyConfig) -> Self {
        Self {
            tenants: Tenants::new(cfg),
            users: Users::new(cfg),
            pages: Pages::new(cfg),
            inheritance: TenantInheritance::new(cfg),
        }
    }

    #[must_use]
    pub fn collection(&self, collection: Collection) -> &dyn CollectionAccess {
        match collection {
            Collection::Tenants => &self.tenants,
            Collection::Users => &self.users,
            Collection::Pages => &self.pages,
        }
    }

    /// Looks a collection up by its host slug.
    ///
    /// # Errors
    /// Returns `AccessError::UnknownCollection` for slugs the core does not govern.
    pub fn collection_by_slug(&self, slug: &str) -> Result<&dyn CollectionAccess, AccessError> {
        Ok(self.collection(slug.parse()?))
    }

    #[instrument(skip_all, fields(collection = %collection, operation = %operation))]
    #[must_use]
    pub fn evaluate(
        &self,
        collection: Collection,
        operation: Operation,
        ctx: &RequestContext,
    ) -> AccessDecision {
        let decision = self.collection(collection).evaluate(operation, ctx);
        debug!(
            user_id = ctx.user().map(tenancy_security::AuthUser::id),
            outcome = decision.kind(),
            "access evaluated"
        );
        decision
    }

    /// Like [`AccessPolicy::evaluate`], with outright denial as an error.
    ///
    /// # Errors
    /// Returns `AccessError::Denied` when the decision is `DenyAll`.
    pub fn authorize(
        &self,
        collection: Collection,
        operation: Operation,
        ctx: &RequestContext,
    ) -> Result<AccessScope, AccessError> {
        match self.evaluate(collection, operation, ctx) {
            AccessDecision::GrantAll => Ok(AccessScope::Unrestricted),
            AccessDecision::Filter(c) => Ok(AccessScope::Filtered(c)),
            AccessDecision::DenyAll => Err(AccessError::Denied {
                collection,
                operation,
            }),
        }
    }

    /// Field-level check; fields without an override follow the record-level decision.
    #[must_use]
    pub fn field_allows(
        &self,
        collection: Collection,
        field: &str,
        operation: FieldOperation,
        ctx: &RequestContext,
    ) -> bool {
        let guard = match collection {
            Collection::Users => self.users.field_guard(field),
            Collection::Tenants | Collection::Pages => None,
        };
        guard.is_none_or(|g| g.allows(operation, ctx))
    }

    /// Runs the user `beforeChange` hook.
    #[must_use]
    pub fn before_user_change(
        &self,
        ctx: &RequestContext,
        operation: Operation,
        payload: Map<String, Value>,
    ) -> Map<String, Value> {
        self.inheritance.apply(ctx, operation, payload)
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(&TenancyConfig::default())
    }
}
